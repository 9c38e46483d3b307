use chrono::{DateTime, Utc};
use photo_report::*;
use std::path::Path;

/// Build a report from every file in a directory, using each file's modification time
/// as its timestamp and the directory name as the project.
///
/// Usage: cargo run --example photo-report -- <image-dir> <out-dir>
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    let (Some(image_dir), Some(out_dir)) = (args.next(), args.next()) else {
        eprintln!("usage: photo-report <image-dir> <out-dir>");
        std::process::exit(2);
    };
    let image_dir = Path::new(&image_dir);
    let project = image_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photos".to_string());

    let mut records: Vec<ImageRecord> = Vec::new();
    for entry in std::fs::read_dir(image_dir).unwrap() {
        let entry = entry.unwrap();
        if !entry.file_type().unwrap().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let modified: DateTime<Utc> = entry.metadata().unwrap().modified().unwrap().into();
        records.push(ImageRecord::new(
            &name,
            &project,
            format!("{name} from {}", image_dir.display()),
            modified,
            ImagePayload::Remote(name.clone()),
        ));
    }

    let mut options = ReportOptions::new();
    options.filename(format!("{project}.pdf")).info(
        Info::new()
            .title(format!("{project} photo report"))
            .subject("Site photos")
            .clone(),
    );

    let fetcher = FsFetcher::new(image_dir);
    let mut sink = DirectorySink::new(&out_dir);
    if let Err(error) =
        generate_report(&records, &fetcher, &mut LogDiagnostics, &mut sink, &options)
    {
        eprintln!("failed to generate report: {error}");
        std::process::exit(1);
    }
    println!("wrote {out_dir}/{project}.pdf from {} files", records.len());
}
