//! Report generation: build a context, render it through a handlebars
//! template and write the result into the output directory.

pub mod created_merged;
pub mod pull_requests_list;

use handlebars::Handlebars;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::source::{DataSource, SourceError};

pub use created_merged::CreatedMergedPrsReport;
pub use pull_requests_list::PullRequestsListReport;

/// Named values handed to the template engine.
pub type ReportContext = serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("template `{name}` not found in {}", dir.display())]
    TemplateNotFound { name: String, dir: PathBuf },

    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render report: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("report `{report}` does not provide a context")]
    NotImplemented { report: &'static str },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load pull requests: {0}")]
    DataSource(#[from] SourceError),
}

/// Where templates are read from and reports are written to.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// A report knows its template, its output file and how to build its context.
#[allow(async_fn_in_trait)]
pub trait Report {
    const TEMPLATE: &'static str;
    const OUTPUT_FILENAME: &'static str;

    fn name(&self) -> &'static str;

    async fn context(&self) -> Result<ReportContext, ReportError> {
        Err(ReportError::NotImplemented {
            report: self.name(),
        })
    }
}

pub struct ReportGenerator<R> {
    report: R,
    template_engine: Handlebars<'static>,
    output_path: PathBuf,
}

impl<R: Report> ReportGenerator<R> {
    pub fn new(report: R, config: &RenderConfig) -> Result<Self, ReportError> {
        let template_path = config.template_dir.join(R::TEMPLATE);
        if !template_path.is_file() {
            return Err(ReportError::TemplateNotFound {
                name: R::TEMPLATE.to_string(),
                dir: config.template_dir.clone(),
            });
        }

        let mut template_engine = Handlebars::new();

        // Embed a context value as raw JSON, e.g. chart data inside <script>
        template_engine.register_helper(
            "json",
            Box::new(|h: &handlebars::Helper,
                     _: &Handlebars,
                     _: &handlebars::Context,
                     _: &mut handlebars::RenderContext,
                     out: &mut dyn handlebars::Output| -> handlebars::HelperResult {
                if let Some(param) = h.param(0) {
                    out.write(&param.value().to_string())?;
                }
                Ok(())
            }),
        );

        // Format an RFC 3339 timestamp as YYYY-MM-DD
        template_engine.register_helper(
            "day",
            Box::new(|h: &handlebars::Helper,
                     _: &Handlebars,
                     _: &handlebars::Context,
                     _: &mut handlebars::RenderContext,
                     out: &mut dyn handlebars::Output| -> handlebars::HelperResult {
                let parsed = h
                    .param(0)
                    .and_then(|v| v.value().as_str())
                    .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok());

                if let Some(at) = parsed {
                    out.write(&at.format("%Y-%m-%d").to_string())?;
                }
                Ok(())
            }),
        );

        template_engine.register_template_file(R::TEMPLATE, &template_path)?;
        debug!(template = %template_path.display(), "Registered template");

        Ok(Self {
            report,
            template_engine,
            output_path: config.output_dir.join(R::OUTPUT_FILENAME),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn render(&self) -> Result<String, ReportError> {
        let context = self.report.context().await?;
        Ok(self.template_engine.render(R::TEMPLATE, &context)?)
    }

    /// Render the report and write it out. The output directory must already exist.
    #[instrument(skip(self), fields(report = self.report.name()))]
    pub async fn generate_report(&self) -> Result<(), ReportError> {
        let rendered = self.render().await?;
        write_file(self.output_path(), &rendered)?;
        info!(path = %self.output_path().display(), bytes = rendered.len(), "Report written");
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    let write_err = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)
}

/// Generate every report in turn. A failure stops the run but keeps files already written.
pub async fn generate_all<D: DataSource>(source: &D, config: &RenderConfig) -> Result<(), ReportError> {
    ReportGenerator::new(PullRequestsListReport::new(source), config)?
        .generate_report()
        .await?;
    ReportGenerator::new(CreatedMergedPrsReport::new(source), config)?
        .generate_report()
        .await?;
    Ok(())
}
