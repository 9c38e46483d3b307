use crate::document::Document;
use crate::error::ReportError;
use crate::layout::Cursor;
use crate::options::{CancelPolicy, CancelToken, ReportOptions};
use crate::record::ImageRecord;
use crate::render::{RecordRenderer, RenderOutcome};
use crate::source::{Diagnostics, ImageFetcher, OutputSink, RecordProvider};

/// Turns a set of records into a finished report document.
///
/// Records are placed newest first, one at a time. A record that can't be fetched or
/// decoded is reported to the [Diagnostics] sink and skipped; it never stops the rest of
/// the report from being built.
pub struct Assembler<'a> {
    fetcher: &'a dyn ImageFetcher,
    diagnostics: &'a mut dyn Diagnostics,
    options: &'a ReportOptions,
    cancel: Option<CancelToken>,
}

impl<'a> Assembler<'a> {
    pub fn new(
        fetcher: &'a dyn ImageFetcher,
        diagnostics: &'a mut dyn Diagnostics,
        options: &'a ReportOptions,
    ) -> Assembler<'a> {
        Assembler {
            fetcher,
            diagnostics,
            options,
            cancel: None,
        }
    }

    /// Check `token` before each record
    pub fn with_cancellation(mut self, token: CancelToken) -> Assembler<'a> {
        self.cancel = Some(token);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Lay out `records` into a new document. The result always has at least one page,
    /// even when no record could be placed.
    pub fn assemble(&mut self, mut records: Vec<ImageRecord>) -> Result<Document, ReportError> {
        if let Some(project) = &self.options.project {
            records.retain(|record| &record.project_label == project);
        }
        // stable, so records with equal timestamps keep their relative order
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut document = Document::default();
        document.set_info(self.options.info.clone());
        let renderer = RecordRenderer::new(&mut document, self.fetcher, self.options);
        let mut cursor = Cursor::start(&mut document);

        let total = records.len();
        let mut placed = 0;
        for (i, record) in records.iter().enumerate() {
            if self.cancelled() {
                match self.options.cancel_policy {
                    CancelPolicy::KeepPartial => {
                        log::warn!(
                            "cancelled after {i} of {total} records, keeping partial report"
                        );
                        break;
                    }
                    CancelPolicy::Fail => return Err(self.fail(ReportError::Cancelled)),
                }
            }

            match renderer.render(record, &mut cursor, &mut document) {
                RenderOutcome::Placed(_) => placed += 1,
                RenderOutcome::Skipped(reason) => self.diagnostics.skipped(record, &reason),
            }
        }

        log::info!(
            "placed {placed} of {total} records on {} page(s)",
            document.page_count()
        );
        Ok(document)
    }

    /// Fetch the record list, assemble it, serialize the result and hand it to `sink`.
    /// On any fatal error the sink receives nothing.
    pub fn generate(
        &mut self,
        provider: &dyn RecordProvider,
        sink: &mut dyn OutputSink,
    ) -> Result<(), ReportError> {
        let records = match provider.list_records() {
            Ok(records) => records,
            Err(error) => return Err(self.fail(error.into())),
        };
        // assemble reports its own cancellation
        let document = self.assemble(records)?;
        let bytes = document.into_bytes().map_err(|error| self.fail(error))?;
        sink.deliver(&self.options.filename, &bytes)
            .map_err(|error| self.fail(ReportError::Sink(error)))
    }

    fn fail(&mut self, error: ReportError) -> ReportError {
        self.diagnostics.fatal(&error);
        error
    }
}

/// Generate a report from `provider` and deliver it to `sink` in one call
pub fn generate_report(
    provider: &dyn RecordProvider,
    fetcher: &dyn ImageFetcher,
    diagnostics: &mut dyn Diagnostics,
    sink: &mut dyn OutputSink,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    Assembler::new(fetcher, diagnostics, options).generate(provider, sink)
}
