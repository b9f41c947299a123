use splinekit::geometry::Point;
use splinekit::import::{
    CollectingObserver, ImportWarning, Repair, RepairKind, SourceFormat, WarningKind,
};
use splinekit::interchange::export_json;
use splinekit::{import, import_blocking, CancellationToken, Error, ImportConfig, Payload};

use super::utils::{anchors, assert_points_close};

fn svg_document(count: usize) -> String {
    let paths: String = (0..count)
        .map(|i| format!(r#"<path id="p{i}" d="M 0 {i} L 40 {i}"/>"#))
        .collect();
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{paths}</svg>"#)
}

#[test]
fn test_object_ceiling() {
    let config = ImportConfig {
        max_objects: 5,
        ..Default::default()
    };
    let report = import_blocking(
        svg_document(12).into(),
        &config,
        &CancellationToken::new(),
        &mut (),
    )
    .expect("import");
    assert_eq!(report.format, SourceFormat::Svg);
    assert_eq!(report.objects.len(), 5);
    assert_eq!(report.objects[4].id, "p4");
    assert_eq!(
        report.warnings,
        [ImportWarning {
            object: None,
            kind: WarningKind::ObjectsTruncated { from: 12, to: 5 },
        }]
    );
}

#[tokio::test]
async fn test_cancel_from_another_task() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    // Runs at the first yield, i.e. straight after the first batch
    tokio::spawn(async move { canceller.cancel() });

    let config = ImportConfig {
        batch_size: 4,
        ..Default::default()
    };
    let mut observer = CollectingObserver::default();
    let result = import(svg_document(40).into(), &config, &token, &mut observer).await;

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(observer.progress, [(4, 40)]);
    assert_eq!(observer.objects.len(), 4);
    assert!(!observer.completed);
    assert!(observer.failure.is_none());
}

#[tokio::test]
async fn test_async_matches_blocking() {
    let config = ImportConfig {
        batch_size: 3,
        seed: 42,
        ..Default::default()
    };
    let input = r#"[{"points": [{"x": 0, "y": 0}, {"x": 10, "y": 5}]}, {"points": [{"x": 1, "y": 1}, {"x": 2, "y": 2}]}]"#;
    let mut observer = CollectingObserver::default();
    let a = import(input.into(), &config, &CancellationToken::new(), &mut observer)
        .await
        .expect("async import");
    let b = import_blocking(input.into(), &config, &CancellationToken::new(), &mut ())
        .expect("blocking import");
    assert_eq!(a, b);
    assert_eq!(observer.objects, a.objects);
    assert!(observer.completed);
}

#[test]
fn test_bad_shapes_skipped() {
    let doc = r#"<svg>
  <path id="ok" d="M 0 0 L 10 10"/>
  <path id="dot" d="M 5 5"/>
  <path id="junk" d="(1, 2)"/>
  <path id="also-ok" d="M 0 0 H 20"/>
</svg>"#;
    let mut observer = CollectingObserver::default();
    let report = import_blocking(
        doc.into(),
        &ImportConfig::default(),
        &CancellationToken::new(),
        &mut observer,
    )
    .expect("import");
    let ids: Vec<&str> = report.objects.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["ok", "also-ok"]);
    assert_eq!(report.skipped, 2);
    assert_eq!(observer.warnings.len(), 2);
    assert!(observer
        .warnings
        .iter()
        .all(|w| matches!(w.kind, WarningKind::ShapeSkipped { .. })));
    assert!(observer.completed);
}

#[test]
fn test_placeholder_for_insufficient_geometry() {
    let config = ImportConfig {
        placeholder_on_insufficient: true,
        ..Default::default()
    };
    let report = import_blocking(
        r#"<svg><path id="dot" d="M 5 5"/></svg>"#.into(),
        &config,
        &CancellationToken::new(),
        &mut (),
    )
    .expect("import");
    assert_eq!(report.objects.len(), 1);
    assert_points_close(
        &anchors(&report.objects[0].points),
        &[Point::new(0., 0.), Point::new(100., 0.)],
    );
    assert_eq!(report.warnings[0].kind, WarningKind::Placeholder);
}

#[test]
fn test_format_error_is_terminal() {
    let mut observer = CollectingObserver::default();
    let result = import_blocking(
        "just some words".into(),
        &ImportConfig::default(),
        &CancellationToken::new(),
        &mut observer,
    );
    assert!(matches!(result, Err(Error::Format(_))));
    assert!(observer.progress.is_empty());
    assert!(observer.failure.is_some());
    assert!(!observer.completed);
}

#[test]
fn test_json_repairs() {
    let input = r#"{"objects": [
  {"id": "a", "name": "First",
   "points": [
     {"id": "p", "x": 0, "y": 0, "handleIn": {"x": -5, "y": 0}, "handleOut": {"x": 5, "y": 0}},
     {"id": "p", "x": "NaN", "y": "10"}
   ],
   "curveConfig": {"styles": [{"color": "red", "width": 2}]},
   "transform": {"rotation": 0, "scaleX": 1, "scaleY": 1}},
  {"id": "a", "points": [{"x": 1, "y": 1}, {"x": 2, "y": 2}]}
]}"#;
    let report = import_blocking(
        input.into(),
        &ImportConfig::default(),
        &CancellationToken::new(),
        &mut (),
    )
    .expect("import");
    assert_eq!(report.format, SourceFormat::Json);
    assert_eq!(report.objects.len(), 2);

    let first = &report.objects[0];
    assert_eq!(first.points[1].anchor, Point::new(0., 10.));
    assert_eq!(first.points[1].handle_in, Point::new(-30., 10.));
    assert_ne!(first.points[0].id, first.points[1].id);
    assert_eq!(first.styles[0].color, "red");

    let second = &report.objects[1];
    assert_ne!(second.id, "a");
    assert_eq!(second.name, "Path 2");
    assert!(!second.styles.is_empty());

    for repair in [
        Repair {
            object: 0,
            point: Some(1),
            kind: RepairKind::NonFiniteCoordinate,
        },
        Repair {
            object: 0,
            point: Some(1),
            kind: RepairKind::DuplicateId,
        },
        Repair {
            object: 0,
            point: Some(1),
            kind: RepairKind::MissingHandle,
        },
        Repair {
            object: 1,
            point: None,
            kind: RepairKind::DuplicateId,
        },
        Repair {
            object: 1,
            point: None,
            kind: RepairKind::MissingTransform,
        },
    ] {
        assert!(report.repairs.contains(&repair), "{repair} not recorded");
    }
}

#[test]
fn test_export_then_import() {
    let original = import_blocking(
        "M 0 0 C 10 -10 30 -10 40 0 S 70 10 80 0".into(),
        &ImportConfig::default(),
        &CancellationToken::new(),
        &mut (),
    )
    .expect("import path");
    let json = export_json(&original.objects).expect("export");
    let reimported = import_blocking(
        Payload::Text(json),
        &ImportConfig::default(),
        &CancellationToken::new(),
        &mut (),
    )
    .expect("reimport");
    assert!(reimported.repairs.is_empty());
    assert_eq!(reimported.objects, original.objects);
}
