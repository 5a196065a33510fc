use serde_json::json;
use sheet_pack::*;

fn px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

fn designs() -> Vec<Design> {
    serde_json::from_value(json!([
        {
            "id": "badge",
            "name": "Badge",
            "width": px(50.0),
            "height": px(50.0),
            "copies": 3,
            "svg": "<svg viewBox=\"0 0 50 50\"><circle cx=\"25\" cy=\"25\" r=\"20\" stroke=\"black\"/></svg>"
        },
        {
            "id": "sign",
            "width": px(100.0).to_string(),
            "height": px(150.0),
            "toolbarState": { "copies": "2" },
            "preview": "https://example.com/sign.png"
        },
        {
            "id": "broken",
            "width": "wide",
            "height": 10
        }
    ]))
    .unwrap()
}

#[test]
fn test_normalize_designs_orders_and_filters() {
    let items = normalize_designs(&designs());
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["sign", "badge"]);

    let sign = &items[0];
    assert_eq!(sign.name, "Design 2");
    assert_eq!(sign.copies, 2);
    assert!((sign.width_mm - 100.0).abs() < 1e-6);
    assert!((sign.height_mm - 150.0).abs() < 1e-6);
    assert_eq!(sign.svg, None);
}

#[test]
fn test_defaults_for_missing_fields() {
    let designs: Vec<Design> =
        serde_json::from_value(json!([{ "width": 10, "height": 20, "svg": "   " }])).unwrap();
    let items = normalize_designs(&designs);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "design-0");
    assert_eq!(items[0].name, "Design 1");
    assert_eq!(items[0].copies, 1);
    assert_eq!(items[0].svg, None);
}

#[test]
fn test_plan_end_to_end() {
    let options = PackingOptions::default();
    let plan = plan(&designs(), &options);

    assert_eq!(plan.sheet_size, SheetSize::new(210.0, 297.0));
    assert_eq!(plan.items.len(), 2);
    assert_eq!(plan.summary.requested_copies, 5);
    assert_eq!(plan.summary.placed_copies, 5);
    assert_eq!(plan.summary.sheet_count, 1);
    assert!(plan.result.leftovers.is_empty());

    // plans are pure
    assert_eq!(plan, sheet_pack::plan(&designs(), &options));
}

#[test]
fn test_export_payload() {
    let options = PackingOptions::default();
    let plan = plan(&designs(), &options);
    let payload = build_export_payload(&plan.result, &options.render);

    assert_eq!(payload.sheets.len(), 1);
    let sheet = &payload.sheets[0];
    assert_eq!((sheet.width_mm, sheet.height_mm), (210.0, 297.0));
    assert_eq!(sheet.placements.len(), 5);

    let sign = sheet.placements.iter().find(|p| p.id == "sign::1").unwrap();
    assert_eq!(sign.svg, None);

    let badge = sheet.placements.iter().find(|p| p.id == "badge::2").unwrap();
    assert_eq!(badge.base_id, "badge");
    assert_eq!(badge.copy_index, 2);
    assert_eq!(badge.copies, 3);
    let markup = badge.svg.as_deref().unwrap();
    assert!(markup.contains(r##"stroke="#ff0000""##));

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json["sheets"][0]["widthMm"].is_number());
    assert!(json["sheets"][0]["placements"][0]["baseId"].is_string());
}

#[test]
fn test_item_files() {
    let options = PackingOptions::default();
    let items = normalize_designs(&designs());
    let files = item_files(&items, &options.render);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].base_id, "badge");
    assert_eq!(files[0].file_name, "badge.svg");
    assert!(files[0].markup.starts_with("<svg"));
}

/// Sheet geometry without the display names, which fall back to input position
fn layout_geometry(plan: &Plan) -> Vec<(Vec<(f64, f64, f64)>, Vec<(String, f64, f64, f64, f64, bool)>)> {
    plan.result
        .sheets
        .iter()
        .map(|sheet| {
            let rows = sheet
                .rows
                .iter()
                .map(|r| (r.y, r.height, r.used_width))
                .collect();
            let placements = sheet
                .placements
                .iter()
                .map(|p| (p.id.clone(), p.x, p.y, p.width, p.height, p.rotated))
                .collect();
            (rows, placements)
        })
        .collect()
}

#[test]
fn test_input_order_does_not_change_layout() {
    let mut designs: Vec<Design> = serde_json::from_value(json!([
        { "id": "a", "width": px(100.0), "height": px(300.0), "copies": 2 },
        { "id": "b", "width": px(300.0), "height": px(100.0) },
        { "id": "c", "width": px(200.0), "height": px(200.0), "copies": 3 }
    ]))
    .unwrap();

    let options = PackingOptions {
        paper_size: PaperSize::A3,
        ..Default::default()
    };
    let forward = plan(&designs, &options);

    designs.reverse();
    let reversed = plan(&designs, &options);

    assert!(!forward.result.sheets.is_empty());
    assert_eq!(layout_geometry(&forward), layout_geometry(&reversed));
    assert_eq!(forward.result.leftovers.len(), reversed.result.leftovers.len());
    assert_eq!(forward.summary.sheet_count, reversed.summary.sheet_count);
}

#[test]
fn test_item_file_names_stay_inside_target_dir() {
    let svg = "<svg viewBox=\"0 0 10 10\"/>";
    let designs: Vec<Design> = serde_json::from_value(json!([
        { "id": "../../etc/passwd", "width": 10, "height": 10, "svg": svg },
        { "id": "/tmp/evil", "width": 10, "height": 10, "svg": svg },
        { "id": "C:\\win dows", "width": 10, "height": 10, "svg": svg },
        { "id": "plain-id_1.v2", "width": 10, "height": 10, "svg": svg }
    ]))
    .unwrap();

    let items = normalize_designs(&designs);
    let files = item_files(&items, &RenderConfig::default());
    assert_eq!(files.len(), 4);

    let mut names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        vec![".._.._etc_passwd.svg", "C__win_dows.svg", "_tmp_evil.svg", "plain-id_1.v2.svg"]
    );

    let dir = std::path::Path::new("out");
    for file in &files {
        let path = dir.join(&file.file_name);
        assert_eq!(path.parent(), Some(dir));
        assert!(!file.file_name.contains('/') && !file.file_name.contains('\\'));
    }

    // base ids are reported unchanged
    assert!(files.iter().any(|f| f.base_id == "../../etc/passwd"));
}
