use sheet_pack::*;

fn sample_sheet(svg: Option<&str>) -> Sheet {
    let item = NormalizedItem {
        id: "label".to_string(),
        name: "Label".to_string(),
        width_mm: 60.0,
        height_mm: 30.0,
        area: 1800.0,
        copies: 2,
        svg: svg.map(str::to_string),
        preview: None,
        theme_stroke_color: None,
    };
    // a 35 mm wide sheet forces the rotated orientation
    let result = pack(&[item], SheetSize::new(35.0, 200.0), 5.0, &PackingConfig::default());
    assert_eq!(result.sheets.len(), 1);
    result.sheets.into_iter().next().unwrap()
}

#[test]
fn test_preview_document_covers_sheet() {
    let sheet = sample_sheet(None);
    let doc = sheet_preview(&sheet, &PreviewOptions::default(), &RenderConfig::default()).to_string();

    assert!(doc.contains(r#"viewBox="0 0 35 200""#));
    assert!(doc.contains(r#"width="35mm""#));
    assert!(doc.contains(r#"id="label::1""#));
    assert!(doc.contains(r#"id="label::2""#));
    assert!(doc.contains("1/2"));
    assert!(doc.contains("rotated"));
    assert!(!doc.contains("<image"));
}

#[test]
fn test_preview_embeds_rotated_artwork() {
    let sheet = sample_sheet(Some(r#"<svg viewBox="0 0 60 30"><rect width="60" height="30"/></svg>"#));
    assert!(sheet.placements[0].rotated);

    let doc = sheet_preview(&sheet, &PreviewOptions::default(), &RenderConfig::default()).to_string();
    assert!(doc.contains("<image"));
    assert!(doc.contains("data:image/svg+xml;base64,"));
    assert!(doc.contains("translate(30 0) rotate(90)"));
}

#[test]
fn test_preview_without_labels_or_artwork() {
    let sheet = sample_sheet(Some(r#"<svg viewBox="0 0 60 30"/>"#));
    let options = PreviewOptions {
        show_labels: false,
        embed_artwork: false,
        ..Default::default()
    };

    let doc = sheet_preview(&sheet, &options, &RenderConfig::default()).to_string();
    assert!(!doc.contains("<image"));
    assert!(!doc.contains("<text"));
}
