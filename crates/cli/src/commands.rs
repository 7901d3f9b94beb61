//! CLI commands

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Subcommand, ValueEnum};
use linkqr_core::{ErrorCorrection, QrStyle, StyleSettings, Theme, ViewState};
use linkqr_http::LinkQrClient;
use linkqr_http::types::{
    DownloadFormat, LinkListQuery, LoginRequest, QrCodeCreateRequest, QrCodePreviewRequest,
    QrCodeUpdateRequest, RegisterRequest, ShortenRequest, UrlUpdateRequest,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "LINKQR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long, env = "LINKQR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Shorten a URL without an account
    Shorten {
        url: String,

        /// Custom short code (3-20 letters, digits or hyphens)
        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },

    /// Manage your short links
    Links {
        #[command(subcommand)]
        command: LinkCommands,
    },

    /// Manage your QR codes
    Qr {
        #[command(subcommand)]
        command: QrCommands,
    },

    /// Style applied to new QR codes and previews
    Style {
        #[command(subcommand)]
        command: StyleCommands,
    },

    /// Show or change the colour theme
    Theme { mode: Option<ThemeMode> },
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Create a short link owned by you
    Create {
        url: String,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// List your links
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        active_only: bool,

        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Show one of your links
    Get { id: i64 },

    /// Public information about any short code
    Info { code: String },

    /// Change title, tags or active flag
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        tags: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete one of your links
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum QrCommands {
    /// List your QR codes; paging and search are remembered between runs
    List {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, conflicts_with_all = ["prev", "page"])]
        next: bool,

        #[arg(long, conflicts_with = "page")]
        prev: bool,
    },

    /// Show a QR code
    Get { id: i64 },

    /// Create a QR code with the current style
    Create {
        content: String,

        #[arg(long)]
        title: Option<String>,
    },

    /// Render a QR code with the current style without saving it
    Preview {
        content: String,

        /// Write the PNG here instead of printing base64
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download a QR code image
    Download {
        id: i64,

        #[arg(long, default_value = "png")]
        format: DownloadFormat,

        /// Output file (defaults to qr_<id>.<format>)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Change the title of a QR code
    Rename { id: i64, title: String },

    /// Delete a QR code
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum StyleCommands {
    /// Print the current style
    Show,

    /// Change parts of the current style
    Set {
        #[arg(long)]
        fg: Option<String>,

        #[arg(long)]
        bg: Option<String>,

        #[arg(long)]
        style: Option<QrStyle>,

        #[arg(long)]
        box_size: Option<u8>,

        #[arg(long)]
        border_size: Option<u8>,

        #[arg(long)]
        ec: Option<ErrorCorrection>,

        /// Image embedded in the middle of the code
        #[arg(long, conflicts_with = "clear_logo")]
        logo: Option<PathBuf>,

        #[arg(long)]
        clear_logo: bool,
    },

    /// Go back to the default style and drop the logo
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
    Toggle,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Commands {
    pub async fn execute(self, client: &LinkQrClient, view: &mut ViewState) -> Result<()> {
        match self {
            Commands::Login { email, password } => {
                let user = client.login(&LoginRequest { email, password }).await?;
                if let Ok(theme) = user.theme_preference.parse::<Theme>() {
                    view.theme = theme;
                }
                print_json(&user)
            }
            Commands::Register {
                email,
                username,
                password,
            } => {
                let request = RegisterRequest {
                    email,
                    username,
                    password,
                };
                print_json(&client.register(&request).await?)
            }
            Commands::Logout => {
                client.logout().await.context("Logout failed")?;
                info!("Logged out");
                Ok(())
            }
            Commands::Whoami => print_json(&client.me().await?),
            Commands::Shorten { url, code, title } => {
                let request = ShortenRequest {
                    custom_code: code,
                    title,
                    ..ShortenRequest::new(url)
                };
                print_json(&client.shorten(&request).await?)
            }
            Commands::Links { command } => command.execute(client).await,
            Commands::Qr { command } => command.execute(client, view).await,
            Commands::Style { command } => command.execute(view),
            Commands::Theme { mode } => set_theme(client, view, mode).await,
        }
    }
}

impl LinkCommands {
    pub async fn execute(self, client: &LinkQrClient) -> Result<()> {
        match self {
            LinkCommands::Create {
                url,
                code,
                title,
                tags,
            } => {
                let request = ShortenRequest {
                    custom_code: code,
                    title,
                    tags,
                    ..ShortenRequest::new(url)
                };
                print_json(&client.create_link(&request).await?)
            }
            LinkCommands::List {
                search,
                active_only,
                skip,
                limit,
            } => {
                let query = LinkListQuery {
                    skip,
                    limit,
                    search,
                    active_only,
                };
                print_json(&client.list_links(&query).await?)
            }
            LinkCommands::Get { id } => print_json(&client.get_link(id).await?),
            LinkCommands::Info { code } => print_json(&client.link_info(&code).await?),
            LinkCommands::Update {
                id,
                title,
                tags,
                active,
            } => {
                let request = UrlUpdateRequest {
                    title,
                    is_active: active,
                    tags,
                };
                print_json(&client.update_link(id, &request).await?)
            }
            LinkCommands::Delete { id } => {
                client.delete_link(id).await?;
                info!(id, "Link deleted");
                Ok(())
            }
        }
    }
}

impl QrCommands {
    pub async fn execute(self, client: &LinkQrClient, view: &mut ViewState) -> Result<()> {
        match self {
            QrCommands::List {
                page,
                per_page,
                search,
                next,
                prev,
            } => {
                if let Some(search) = search {
                    view.set_search(search);
                }
                if let Some(per_page) = per_page {
                    view.set_per_page(per_page);
                }
                if let Some(page) = page {
                    view.page = page.max(1);
                }
                if next && !view.next_page(view.pages) {
                    info!("Already on the last page");
                }
                if prev && !view.prev_page() {
                    info!("Already on the first page");
                }

                let list = client.list_qr_codes(&view.list_query()).await?;
                view.record_pages(list.pages);
                print_json(&list)
            }
            QrCommands::Get { id } => print_json(&client.get_qr_code(id).await?),
            QrCommands::Create { content, title } => {
                let request = QrCodeCreateRequest::from_view(content, title, view);
                let created = client.create_qr_code(&request).await?;
                info!(id = created.id, "QR code created");
                view.reset_paging();
                print_json(&created)
            }
            QrCommands::Preview { content, out } => {
                let request = QrCodePreviewRequest::from_view(content, view);
                let preview = client.preview_qr_code(&request).await?;
                match out {
                    Some(path) => {
                        let image = BASE64
                            .decode(&preview.qr_image_base64)
                            .context("Server returned an invalid preview image")?;
                        std::fs::write(&path, image)?;
                        info!(path = %path.display(), "Preview written");
                        Ok(())
                    }
                    None => print_json(&preview),
                }
            }
            QrCommands::Download { id, format, out } => {
                let image = client.download_qr_code(id, format).await?;
                let path = out.unwrap_or_else(|| PathBuf::from(format.file_name(id)));
                std::fs::write(&path, &image)?;
                info!(path = %path.display(), "QR code downloaded as {}", format.as_str().to_uppercase());
                Ok(())
            }
            QrCommands::Rename { id, title } => {
                let request = QrCodeUpdateRequest { title: Some(title) };
                print_json(&client.update_qr_code(id, &request).await?)
            }
            QrCommands::Delete { id } => {
                client.delete_qr_code(id).await?;
                info!(id, "QR code deleted");
                Ok(())
            }
        }
    }
}

impl StyleCommands {
    pub fn execute(self, view: &mut ViewState) -> Result<()> {
        match self {
            StyleCommands::Show => {}
            StyleCommands::Set {
                fg,
                bg,
                style,
                box_size,
                border_size,
                ec,
                logo,
                clear_logo,
            } => {
                let mut settings = view.style.clone();
                if let Some(fg) = fg {
                    settings.foreground_color = fg;
                }
                if let Some(bg) = bg {
                    settings.background_color = bg;
                }
                if let Some(style) = style {
                    settings.style = style;
                }
                if let Some(box_size) = box_size {
                    settings.box_size = box_size;
                }
                if let Some(border_size) = border_size {
                    settings.border_size = border_size;
                }
                if let Some(ec) = ec {
                    settings.error_correction = ec;
                }
                view.style = settings.validate()?;

                if let Some(path) = logo {
                    let bytes = std::fs::read(&path)
                        .with_context(|| format!("Failed to read logo {}", path.display()))?;
                    view.logo_base64 = Some(BASE64.encode(bytes));
                } else if clear_logo {
                    view.logo_base64 = None;
                }
            }
            StyleCommands::Reset => {
                view.style = StyleSettings::default();
                view.logo_base64 = None;
            }
        }

        print_json(&serde_json::json!({
            "style": view.style,
            "logo": view.logo_base64.is_some(),
        }))
    }
}

/// Apply a theme locally, then try to store it on the server
async fn set_theme(client: &LinkQrClient, view: &mut ViewState, mode: Option<ThemeMode>) -> Result<()> {
    let theme = match mode {
        None => {
            println!("{}", view.theme);
            return Ok(());
        }
        Some(ThemeMode::Light) => Theme::Light,
        Some(ThemeMode::Dark) => Theme::Dark,
        Some(ThemeMode::Toggle) => view.theme.toggle(),
    };
    view.theme = theme;
    println!("{theme}");

    // The local preference is already saved; the server copy is best effort.
    if let Err(err) = client.update_theme(theme).await {
        warn!(error = %err, "Could not sync theme with server");
    }
    Ok(())
}
