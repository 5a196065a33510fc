use sheet_pack::*;

#[test]
fn test_paper_size_dimensions() {
    let a4 = PaperSize::A4;
    assert_eq!(a4.dimensions_mm(), (210.0, 297.0));

    let a3 = PaperSize::A3;
    assert_eq!(a3.dimensions_mm(), (297.0, 420.0));

    let a5 = PaperSize::A5;
    assert_eq!(a5.dimensions_mm(), (148.0, 210.0));

    let letter = PaperSize::Letter;
    assert_eq!(letter.dimensions_mm(), (215.9, 279.4));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_sheet_size_with_orientation() {
    let portrait = PaperSize::A4.sheet_size(Orientation::Portrait);
    assert_eq!(portrait, SheetSize::new(210.0, 297.0));

    let landscape = PaperSize::A4.sheet_size(Orientation::Landscape);
    assert_eq!(landscape, SheetSize::new(297.0, 210.0));
}

#[test]
fn test_sheet_size_usability() {
    assert!(SheetSize::new(10.0, 10.0).is_usable());
    assert!(!SheetSize::new(0.0, 10.0).is_usable());
    assert!(!SheetSize::new(10.0, -1.0).is_usable());
    assert!(!SheetSize::new(f64::NAN, 10.0).is_usable());
}

#[test]
fn test_px_to_mm() {
    // 72 px is one inch
    assert!((px_to_mm(72.0) - 25.4).abs() < 1e-9);
    assert!((PX_PER_MM - 2.834_645_669).abs() < 1e-6);
}
