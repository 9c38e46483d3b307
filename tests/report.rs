use chrono::{DateTime, TimeZone, Utc};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use photo_report::*;
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn encoded(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 200])))
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn png(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, ImageOutputFormat::Png)
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, ImageOutputFormat::Jpeg(90))
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, minute, 0).unwrap()
}

fn inline(id: &str, minute: u32, bytes: Vec<u8>, content_type: &str) -> ImageRecord {
    ImageRecord::new(
        id,
        "bridge",
        format!("photo {id}"),
        at(minute),
        ImagePayload::Inline(FetchedImage::new(bytes, content_type)),
    )
}

fn remote(id: &str, minute: u32) -> ImageRecord {
    ImageRecord::new(
        id,
        "bridge",
        format!("photo {id}"),
        at(minute),
        ImagePayload::Remote(format!("{id}.png")),
    )
}

/// The id/timestamp line of every title, in drawing order
fn title_ids(document: &Document) -> Vec<String> {
    document
        .pages()
        .flat_map(|page| page.contents().iter())
        .filter_map(|op| match op {
            DrawOp::Text(text) if text.lines.len() == 2 => Some(text.lines[1].clone()),
            _ => None,
        })
        .collect()
}

fn image_layouts(document: &Document) -> Vec<ImageLayout> {
    document
        .pages()
        .flat_map(|page| page.contents().iter())
        .filter_map(|op| match op {
            DrawOp::Image(image) => Some(image.clone()),
            _ => None,
        })
        .collect()
}

fn count_streams(bytes: &[u8], subtype: &[u8], filter: Option<&[u8]>) -> usize {
    let document = lopdf::Document::load_mem(bytes).unwrap();
    document
        .objects
        .values()
        .filter(|object| match object {
            lopdf::Object::Stream(stream) => {
                let is_subtype = matches!(
                    stream.dict.get(b"Subtype"),
                    Ok(lopdf::Object::Name(name)) if name.as_slice() == subtype
                );
                let has_filter = match filter {
                    Some(filter) => matches!(
                        stream.dict.get(b"Filter"),
                        Ok(lopdf::Object::Name(name)) if name.as_slice() == filter
                    ),
                    None => true,
                };
                is_subtype && has_filter
            }
            _ => false,
        })
        .count()
}

struct Unavailable;

impl RecordProvider for Unavailable {
    fn list_records(&self) -> Result<Vec<ImageRecord>, UpstreamError> {
        Err(UpstreamError("503 service unavailable".to_string()))
    }
}

#[test]
fn records_are_placed_newest_first() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let records = vec![
        inline("t1", 1, png(800, 600), "image/png"),
        inline("t3", 3, png(800, 600), "image/png"),
        inline("t2", 2, png(800, 600), "image/png"),
    ];

    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(records)
        .unwrap();

    assert_eq!(
        title_ids(&document),
        vec![
            "ID: t3 - 2024-05-17 09:03:00".to_string(),
            "ID: t2 - 2024-05-17 09:02:00".to_string(),
            "ID: t1 - 2024-05-17 09:01:00".to_string(),
        ]
    );
    for layout in image_layouts(&document) {
        assert!((*layout.position.width() - 1000.0 / 3.0).abs() < 0.01);
        assert!((*layout.position.height() - 250.0).abs() < 0.01);
    }
    // each record needs 340 units, so the third one starts below the threshold
    assert_eq!(document.page_count(), 2);
    assert!(diagnostics.is_empty());
}

#[test]
fn equal_timestamps_keep_their_input_order() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let records = vec![
        inline("a", 5, png(10, 10), "image/png"),
        inline("b", 5, png(10, 10), "image/png"),
    ];
    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(records)
        .unwrap();
    let ids = title_ids(&document);
    assert!(ids[0].starts_with("ID: a "));
    assert!(ids[1].starts_with("ID: b "));
}

#[test]
fn unsupported_record_is_skipped_with_one_diagnostic() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let records = vec![
        inline("r1", 1, png(800, 600), "image/png"),
        inline("r2", 2, b"BM....".to_vec(), "image/bmp"),
        inline("r3", 3, jpeg(800, 600), "image/jpeg"),
    ];

    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(records)
        .unwrap();

    assert_eq!(image_layouts(&document).len(), 2);
    assert_eq!(document.images.len(), 2);
    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0] {
        Diagnostic::Skipped {
            record_id, kind, ..
        } => {
            assert_eq!(record_id, "r2");
            assert_eq!(*kind, RecordErrorKind::UnsupportedFormat);
        }
        other => panic!("expected a skip, got {other:?}"),
    }
}

#[test]
fn corrupt_bytes_are_a_decode_skip() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let records = vec![inline("r1", 1, b"not a png".to_vec(), "image/png")];
    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(records)
        .unwrap();
    assert_eq!(document.page_count(), 1);
    assert!(matches!(
        &diagnostics[..],
        [Diagnostic::Skipped { kind: RecordErrorKind::Decode, .. }]
    ));
}

#[test]
fn no_records_still_gives_one_blank_page() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(Vec::new())
        .unwrap();
    assert_eq!(document.page_count(), 1);
    assert!(document.pages().all(Page::is_empty));

    let bytes = document.into_bytes().unwrap();
    let reopened = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(reopened.get_pages().len(), 1);
}

#[test]
fn page_count_never_shrinks_as_records_are_added() {
    let options = ReportOptions::default();
    let mut previous = 0;
    for n in 0..8 {
        let records: Vec<ImageRecord> = (0..n)
            .map(|i| inline(&format!("r{i}"), i, png(80, 60), "image/png"))
            .collect();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
            .assemble(records)
            .unwrap();
        assert!(document.page_count() >= previous);
        previous = document.page_count();
    }
    assert!(previous > 1);
}

#[test]
fn project_filter_drops_other_projects_silently() {
    let mut options = ReportOptions::default();
    options.project("bridge");
    let mut other = inline("x1", 9, png(10, 10), "image/png");
    other.project_label = "tunnel".to_string();
    let records = vec![inline("b1", 1, png(10, 10), "image/png"), other];

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(records)
        .unwrap();
    assert_eq!(title_ids(&document).len(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn cancelling_mid_report_keeps_what_was_placed() {
    let options = ReportOptions::default();
    let token = CancelToken::new();
    let trigger = token.clone();
    let fetcher = move |_: &str| -> Result<FetchedImage, FetchError> {
        trigger.cancel();
        Ok(FetchedImage::new(png(40, 30), "image/png"))
    };

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document = Assembler::new(&fetcher, &mut diagnostics, &options)
        .with_cancellation(token)
        .assemble(vec![remote("r1", 1), remote("r2", 2), remote("r3", 3)])
        .unwrap();

    assert_eq!(
        title_ids(&document),
        vec!["ID: r3 - 2024-05-17 09:03:00".to_string()]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn cancelling_with_fail_policy_is_fatal() {
    let mut options = ReportOptions::default();
    options.cancel_policy(CancelPolicy::Fail);
    let token = CancelToken::new();
    token.cancel();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut sink: Vec<(String, Vec<u8>)> = Vec::new();
    let result = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .with_cancellation(token)
        .generate(&vec![inline("r1", 1, png(10, 10), "image/png")], &mut sink);

    assert!(matches!(result, Err(ReportError::Cancelled)));
    assert!(sink.is_empty());
    assert_eq!(
        diagnostics,
        vec![Diagnostic::Fatal("report generation was cancelled".to_string())]
    );
}

#[test]
fn upstream_failure_delivers_nothing() {
    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut sink: Vec<(String, Vec<u8>)> = Vec::new();

    let result = generate_report(
        &Unavailable,
        &InlineOnly,
        &mut diagnostics,
        &mut sink,
        &options,
    );

    assert!(matches!(result, Err(ReportError::UpstreamUnavailable(_))));
    assert!(sink.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(&diagnostics[0], Diagnostic::Fatal(_)));
}

#[test]
fn generated_report_reopens_with_every_image() {
    let mut options = ReportOptions::default();
    options
        .filename("site-visit.pdf")
        .info(Info::new().title("Site visit").creation_date(at(0)).clone());
    let records = vec![
        inline("r1", 1, png(1200, 400), "image/png"),
        inline("r2", 2, png(300, 600), "image/png"),
        inline("r3", 3, jpeg(800, 600), "image/jpeg"),
    ];

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut sink: Vec<(String, Vec<u8>)> = Vec::new();
    generate_report(
        &records,
        &InlineOnly,
        &mut diagnostics,
        &mut sink,
        &options,
    )
    .unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(sink.len(), 1);
    let (filename, bytes) = &sink[0];
    assert_eq!(filename, "site-visit.pdf");
    assert!(bytes.starts_with(b"%PDF-"));

    let reopened = lopdf::Document::load_mem(bytes).unwrap();
    let pages = reopened.get_pages();
    // two full-height images fill the first page
    assert_eq!(pages.len(), 2);
    assert_eq!(count_streams(bytes, b"Image", None), 3);
    assert_eq!(count_streams(bytes, b"Image", Some(&b"DCTDecode"[..])), 1);

    let first = pages.values().next().copied().unwrap();
    let content = reopened.get_page_content(first).unwrap();
    let operators: Vec<String> = lopdf::content::Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect();
    assert_eq!(operators.iter().filter(|op| *op == "Do").count(), 2);
    assert_eq!(operators.iter().filter(|op| *op == "re").count(), 2);
}

#[test]
fn remote_images_go_through_the_fetcher() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("r1.png"), png(64, 48)).unwrap();
    let fetcher = FsFetcher::new(dir.path());

    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document = Assembler::new(&fetcher, &mut diagnostics, &options)
        .assemble(vec![remote("r1", 1), remote("missing", 2)])
        .unwrap();

    assert_eq!(image_layouts(&document).len(), 1);
    assert!(matches!(
        &diagnostics[..],
        [Diagnostic::Skipped { kind: RecordErrorKind::Fetch, record_id, .. }] if record_id == "missing"
    ));
}

#[test]
fn directory_run_reports_every_left_out_file() {
    let photos = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::write(photos.path().join("pier.png"), png(64, 48)).unwrap();
    std::fs::write(photos.path().join("notes.txt"), b"remember the tide tables").unwrap();
    let remote_file = |id: &str, name: &str, minute: u32| {
        ImageRecord::new(id, "bridge", name, at(minute), ImagePayload::Remote(name.into()))
    };
    let records = vec![
        remote_file("pier", "pier.png", 1),
        remote_file("notes", "notes.txt", 2),
    ];

    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut sink = DirectorySink::new(out.path());
    generate_report(
        &records,
        &FsFetcher::new(photos.path()),
        &mut diagnostics,
        &mut sink,
        &options,
    )
    .unwrap();

    assert_eq!(
        diagnostics,
        vec![Diagnostic::Skipped {
            record_id: "notes".to_string(),
            kind: RecordErrorKind::UnsupportedFormat,
            reason: "unsupported image format `text/plain`".to_string(),
        }]
    );
    let bytes = std::fs::read(out.path().join("document.pdf")).unwrap();
    assert_eq!(count_streams(&bytes, b"Image", None), 1);
}

#[test]
fn base64_output_decodes_to_a_pdf() {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    let options = ReportOptions::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let document = Assembler::new(&InlineOnly, &mut diagnostics, &options)
        .assemble(vec![inline("r1", 1, png(20, 20), "image/png")])
        .unwrap();

    let encoded = document.into_base64().unwrap();
    assert!(!encoded.starts_with("data:"));
    let bytes = STANDARD.decode(encoded).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(count_streams(&bytes, b"Image", None), 1);
}
