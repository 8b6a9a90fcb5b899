//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use imagemap_config::{CliSettings, Config};
use imagemap_renderer::{ImageMapRenderer, MarkdownMarkup, TemplateOptions};
use imagemap_storage_fs::FsAttachments;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Input arguments shared by all commands.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// File containing the image map block (default: stdin).
    file: Option<PathBuf>,

    /// Page the block is rendered on; attachment names resolve against it.
    #[arg(short, long, env = "IMAGEMAP_PAGE", default_value = "FrontPage")]
    page: String,

    /// Path to configuration file (default: auto-discover imagemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Attachments directory (overrides config).
    #[arg(long)]
    attachments_dir: Option<PathBuf>,

    /// Attachment URL prefix (overrides config).
    #[arg(long)]
    url_prefix: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Everything a command needs to build one block.
pub(crate) struct Session {
    pub(crate) block: String,
    pub(crate) page: String,
    attachments: FsAttachments,
    markup: MarkdownMarkup,
    options: TemplateOptions,
}

impl InputArgs {
    /// Load configuration and read the block.
    pub(crate) fn open(self) -> Result<Session, CliError> {
        let cli_settings = CliSettings {
            attachments_dir: self.attachments_dir,
            url_prefix: self.url_prefix,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let block = match &self.file {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
            _ => std::io::read_to_string(std::io::stdin())?,
        };

        let attachments = FsAttachments::new(
            config.attachments_resolved.dir.clone(),
            config.attachments_resolved.url_prefix.clone(),
        );
        tracing::info!(dir = %attachments.dir().display(), "Using attachments directory");

        Ok(Session {
            block,
            page: self.page,
            attachments,
            markup: MarkdownMarkup::new(),
            options: config.template_options(),
        })
    }
}

impl Session {
    /// Renderer wired to the configured attachments and template.
    pub(crate) fn renderer(&self) -> ImageMapRenderer<'_> {
        ImageMapRenderer::new(&self.attachments, &self.markup).with_options(self.options.clone())
    }
}
