//! Command-line front end: builds a session from the config and runtime
//! options, renders one page and optionally downloads the selection.

use crate::browser::{Browser, BrowserOptions};
use crate::cli::RuntimeOptions;
use crate::presenter::CapturingSink;
use anyhow::{Context, Result};
use gofont_catalog::{FontManager, GoogleFonts, GoogleFontsOptions, HttpFetcher};
use gofont_config::Config;
use gofont_template::{DirTemplates, EmbeddedTemplates, TemplateEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main application state
pub struct App {
    config: Config,
    options: RuntimeOptions,
    browser: Browser,
    sink: Arc<CapturingSink>,
    embedded_templates: bool,
}

impl App {
    pub fn new(config: Config, options: RuntimeOptions) -> Result<Self> {
        let (templates, embedded_templates) = match config.template_dir() {
            Some(dir) => {
                log::info!("Loading templates from {}", dir.display());
                (TemplateEngine::new(DirTemplates::new(dir)), false)
            }
            None => (TemplateEngine::new(EmbeddedTemplates), true),
        };

        let sink = Arc::new(CapturingSink::new());
        let browser = Browser::new(
            Arc::new(FontManager::new()),
            Arc::new(templates),
            sink.clone(),
            BrowserOptions::from_config(&config),
        )
        .context("Failed to start browsing session")?;

        Ok(Self {
            config,
            options,
            browser,
            sink,
            embedded_templates,
        })
    }

    pub fn run(self) -> Result<()> {
        self.apply_query_options();
        self.load_google_fonts();
        self.browser.wait_idle()?;

        self.apply_selections()?;
        self.browser.wait_idle()?;

        self.write_document()?;

        if let Some(dir) = &self.options.download {
            self.download(dir)?;
        }
        Ok(())
    }

    /// Queue sort, filter, sample and search changes ahead of the first
    /// provider so only the final state is queried against the network data.
    fn apply_query_options(&self) {
        let options = &self.options;
        if let Some(sort) = options.sort {
            self.browser.set_sort(sort);
        }
        if !options.categories.is_empty() {
            self.browser
                .set_categories(options.categories.iter().copied().collect());
        }
        if !options.weights.is_empty() {
            self.browser.set_weights(options.weights.iter().copied().collect());
        }
        if !options.styles.is_empty() {
            self.browser.set_styles(options.styles.iter().copied().collect());
        }
        if let Some(sample) = &options.sample {
            self.browser.submit_sample_text(sample);
        }
        if let Some(size) = &options.size {
            self.browser.set_font_size(size);
        }
        if let Some(search) = &options.search {
            self.browser.submit_search(search);
        }
    }

    fn load_google_fonts(&self) {
        let api_key = self
            .options
            .api_key
            .clone()
            .or_else(|| self.config.api_key())
            .unwrap_or_default();
        if api_key.is_empty() {
            log::warn!("No Google Fonts API key configured; set GOOGLE_FONTS_API_KEY or use --api-key");
        }

        self.browser.set_status("Initializing Google Fonts...");
        let options = GoogleFontsOptions::new(api_key).with_base_url(&self.config.google_fonts_url);
        let google = GoogleFonts::new(options, Arc::new(HttpFetcher::new()));
        log::info!("Google Fonts catalog holds {} families", google.family_count());
        self.browser.add_provider(Arc::new(google));

        if let Some(page) = self.options.page {
            self.browser.load_page(page);
        }
    }

    /// Select the requested variants, then re-render so they show as checked.
    fn apply_selections(&self) -> Result<()> {
        if self.options.selections.is_empty() {
            return Ok(());
        }
        for font in &self.options.selections {
            if let Err(e) = self.browser.select_font(font.clone()) {
                log::warn!("Ignoring selection {}: {}", font, e);
                eprintln!("gofont: skipping {font}: {e}");
            }
        }
        let page = self.browser.current_page()?;
        self.browser.load_page(page);
        Ok(())
    }

    fn write_document(&self) -> Result<()> {
        let html = self
            .sink
            .document()
            .context("No page was rendered")?;

        match &self.options.output {
            Some(path) => {
                std::fs::write(path, &html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if self.embedded_templates {
                    let dir = path
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .unwrap_or(Path::new("."));
                    EmbeddedTemplates::export_support_files(dir).with_context(|| {
                        format!("Failed to write support files to {}", dir.display())
                    })?;
                }
                log::info!("Wrote page to {}", path.display());
            }
            None => println!("{html}"),
        }
        Ok(())
    }

    fn download(&self, dir: &Path) -> Result<()> {
        let dir: PathBuf = if dir.as_os_str().is_empty() {
            self.config.download_dir()
        } else {
            dir.to_path_buf()
        };

        let handle = self.browser.download_selected(&dir)?;
        if handle.fonts().is_empty() {
            eprintln!("gofont: nothing selected to download");
            return Ok(());
        }
        let report = handle.wait()?;

        for path in &report.saved {
            eprintln!("Saved {}", path.display());
        }
        for font in &report.failed {
            eprintln!("gofont: failed to download {font}");
        }
        if !report.failed.is_empty() {
            anyhow::bail!(
                "{} of {} downloads failed",
                report.failed.len(),
                report.failed.len() + report.saved.len()
            );
        }
        Ok(())
    }
}
