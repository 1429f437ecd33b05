//! End-to-end pipeline tests against generated PDF files.
//!
//! PDFs are built in-memory with lopdf, so the tests cover the real decode
//! path: container parsing, content-stream walking, and font lookup.

use std::fs;
use std::time::Duration;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use outpdf::{
    extract_outline_from_bytes, extract_outline_with_limits, process_dir, BatchOptions, Error,
    GuardLimits, HeadingLevel,
};

/// One positioned line of text: (text, x, y, size, bold).
type Span = (&'static str, f32, f32, f32, bool);

/// Build a PDF where each inner vec is one page of positioned text.
fn build_pdf(pages: &[Vec<Span>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut ops = Vec::new();
        for (text, x, y, size, bold) in page {
            let font = if *bold { "F2" } else { "F1" };
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
            ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            ops.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            ops.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// A small report: bold cover title, numbered section, minor heading, and
/// body text sized well below the heading band.
fn report_pdf() -> Vec<u8> {
    let mut page1: Vec<Span> = vec![("Annual Report", 72.0, 760.0, 24.0, true)];
    for i in 0..10 {
        page1.push((
            "quarterly results improved across all divisions this year",
            72.0,
            600.0 - i as f32 * 20.0,
            7.0,
            false,
        ));
    }

    let mut page2: Vec<Span> = vec![
        ("1. Overview", 72.0, 700.0, 14.0, true),
        ("Key Metrics", 72.0, 600.0, 8.0, false),
    ];
    for i in 0..10 {
        page2.push((
            "revenue grew while operating costs stayed mostly flat",
            72.0,
            500.0 - i as f32 * 20.0,
            7.0,
            false,
        ));
    }

    build_pdf(&[page1, page2])
}

#[test]
fn extracts_outline_from_generated_pdf() {
    let data = report_pdf();
    let outline = extract_outline_from_bytes(&data, &GuardLimits::default()).unwrap();

    assert_eq!(outline.title, "Annual Report");

    let entries: Vec<(HeadingLevel, &str, u32)> = outline
        .outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();
    assert!(entries.contains(&(HeadingLevel::H1, "1. Overview", 2)));
    assert!(entries.contains(&(HeadingLevel::H3, "Key Metrics", 2)));
    assert!(outline.outline.iter().all(|e| e.text != "Annual Report"));
    for entry in &outline.outline {
        assert!(entry.page >= 1 && entry.page <= 2);
    }
}

#[test]
fn identical_input_gives_byte_identical_json() {
    let data = report_pdf();
    let a = extract_outline_from_bytes(&data, &GuardLimits::default()).unwrap();
    let b = extract_outline_from_bytes(&data, &GuardLimits::default()).unwrap();
    let ja = outpdf::render::to_json(&a, outpdf::JsonFormat::Pretty).unwrap();
    let jb = outpdf::render::to_json(&b, outpdf::JsonFormat::Pretty).unwrap();
    assert_eq!(ja, jb);
}

#[test]
fn page_limit_rejected_before_processing() {
    let page: Vec<Span> = vec![("content", 72.0, 700.0, 12.0, false)];
    let data = build_pdf(&[page.clone(), page.clone(), page]);

    let limits = GuardLimits::new().with_max_pages(2);
    let result = extract_outline_from_bytes(&data, &limits);
    assert!(matches!(
        result,
        Err(Error::PageLimitExceeded { pages: 3, limit: 2 })
    ));
}

#[test]
fn textless_pdf_yields_empty_outline() {
    let data = build_pdf(&[vec![]]);
    let outline = extract_outline_from_bytes(&data, &GuardLimits::default()).unwrap();
    assert_eq!(outline, outpdf::Outline::empty());
}

#[test]
fn file_based_extraction_matches_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("report.pdf");
    fs::write(&path, report_pdf()).unwrap();

    let from_file = extract_outline_with_limits(&path, &GuardLimits::default()).unwrap();
    let from_bytes =
        extract_outline_from_bytes(&report_pdf(), &GuardLimits::default()).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn batch_isolates_corrupt_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    fs::create_dir(&input).unwrap();

    fs::write(input.join("good.pdf"), report_pdf()).unwrap();
    fs::write(input.join("broken.pdf"), b"%PDF-1.4\ngarbage beyond repair").unwrap();

    let report = process_dir(&input, &output, &BatchOptions::default()).unwrap();
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);

    // Both inputs produced an output file.
    let good: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join("good.json")).unwrap()).unwrap();
    assert_eq!(good["title"], "Annual Report");
    assert!(good["outline"].is_array());

    let broken: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join("broken.json")).unwrap()).unwrap();
    assert_eq!(broken["title"], "");
    assert_eq!(broken["outline"], serde_json::json!([]));
    assert!(broken["error"].is_string());
}

#[test]
fn timeout_is_contained_and_batch_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    fs::create_dir(&input).unwrap();

    // A document heavy enough that it cannot finish within a nanosecond.
    let mut pages = Vec::new();
    for _ in 0..10 {
        let mut page: Vec<Span> = Vec::new();
        for i in 0..60 {
            page.push((
                "densely packed line of report text for the slow document",
                72.0,
                760.0 - i as f32 * 12.0,
                9.0,
                false,
            ));
        }
        pages.push(page);
    }
    fs::write(input.join("slow.pdf"), build_pdf(&pages)).unwrap();
    fs::write(input.join("fast.pdf"), report_pdf()).unwrap();

    let options = BatchOptions::new()
        .with_limits(GuardLimits::new().with_timeout(Duration::from_nanos(1)));
    let report = process_dir(&input, &output, &options).unwrap();

    // Every document times out under a nanosecond budget, none hangs, and
    // every output file is still well-formed JSON.
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.failed(), 2);
    for name in ["slow.json", "fast.json"] {
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join(name)).unwrap()).unwrap();
        assert_eq!(value["outline"], serde_json::json!([]));
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("budget"));
    }
}
