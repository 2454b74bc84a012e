//! Integration tests for LocaleController against an in-memory document
//!
//! These tests verify:
//! - Direction is derived from the locale and never drifts
//! - Document writes happen only when the direction flips
//! - The fade timeline settles at full opacity
//! - Rapid flips resolve to the latest request

use portfolio::locale::{DocumentWrite, FadeTransition};
use portfolio::models::TransitionSettings;
use portfolio::{Locale, LocaleChange, LocaleController, MemoryDocument};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::time::{Duration, sleep};

const SETTLE: Duration = Duration::from_secs(1);

fn controller_with_document() -> (LocaleController, Arc<MemoryDocument>) {
    let doc = Arc::new(MemoryDocument::new());
    let controller =
        LocaleController::new(tokio::runtime::Handle::current()).with_document(doc.clone());
    (controller, doc)
}

#[tokio::test]
async fn test_is_rtl_matches_locale_for_every_transition() {
    let (controller, _doc) = controller_with_document();

    for from in Locale::ALL {
        for to in Locale::ALL {
            controller.set_locale(from);
            controller.set_locale(to);
            assert_eq!(controller.is_rtl(), to == Locale::Ar, "{} -> {}", from, to);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_repeated_arabic_writes_once() {
    let (controller, doc) = controller_with_document();

    controller.set_locale(Locale::Ar);
    sleep(SETTLE).await;
    let writes_after_first = doc.writes().len();
    assert!(writes_after_first > 0);

    let changes = controller.set_locale(Locale::Ar);
    sleep(SETTLE).await;

    assert!(changes.is_empty());
    assert_eq!(doc.writes().len(), writes_after_first);
    assert_eq!(
        controller.metrics().transitions_started.load(Ordering::Relaxed),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_flip_sets_attributes_before_fading() {
    let (controller, doc) = controller_with_document();

    controller.set_locale(Locale::Ar);
    sleep(SETTLE).await;

    let writes = doc.writes();
    assert_eq!(
        writes[0],
        DocumentWrite::Attribute {
            name: "dir".to_string(),
            value: "rtl".to_string()
        }
    );
    assert_eq!(
        writes[1],
        DocumentWrite::Attribute {
            name: "lang".to_string(),
            value: "ar".to_string()
        }
    );
    assert!(
        writes[2..]
            .iter()
            .all(|w| matches!(w, DocumentWrite::Opacity(_)))
    );

    let opacities = doc.opacity_writes();
    assert!(opacities.contains(&0.0), "fade never reached 0: {:?}", opacities);
    assert_eq!(doc.opacity(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_fade_timing() {
    let (controller, doc) = controller_with_document();

    controller.set_locale(Locale::Ar);

    // Halfway through the fade-out the body is partly transparent
    sleep(Duration::from_millis(100)).await;
    let mid_fade_out = doc.opacity();
    assert!(mid_fade_out > 0.0 && mid_fade_out < 1.0, "{}", mid_fade_out);

    // Fade-out done (200ms), fade-in just started
    sleep(Duration::from_millis(120)).await;
    assert!(doc.opacity() < 0.5);
    assert!(controller.is_transition_active());

    // 500ms total plus frame rounding
    sleep(Duration::from_millis(400)).await;
    assert!(!controller.is_transition_active());
    assert_eq!(doc.opacity(), 1.0);
}

#[tokio::test]
async fn test_ltr_to_ltr_switch_leaves_document_alone() {
    let (controller, doc) = controller_with_document();

    let changes = controller.set_locale(Locale::Fr);

    assert_eq!(
        changes,
        vec![LocaleChange::LocaleChanged {
            from: Locale::En,
            to: Locale::Fr
        }]
    );
    assert!(doc.writes().is_empty());
    assert!(!controller.is_transition_active());
}

#[tokio::test]
async fn test_mount_applies_direction_without_fade() {
    let doc = Arc::new(MemoryDocument::new());
    let controller = LocaleController::with_timeline(
        tokio::runtime::Handle::current(),
        Locale::Ar,
        FadeTransition::default(),
    )
    .with_document(doc.clone());

    controller.mount();

    assert_eq!(
        doc.attribute_writes(),
        vec![("dir".to_string(), "rtl".to_string())]
    );
    assert!(doc.opacity_writes().is_empty());
    assert!(!controller.is_transition_active());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_flips_resolve_to_latest_request() {
    let (controller, doc) = controller_with_document();

    controller.set_locale(Locale::Ar);
    sleep(Duration::from_millis(50)).await;
    controller.set_locale(Locale::En);
    sleep(Duration::from_millis(30)).await;
    controller.set_locale(Locale::Ar);
    sleep(Duration::from_millis(30)).await;
    controller.set_locale(Locale::Fr);

    sleep(SETTLE).await;

    assert_eq!(doc.attribute("dir").as_deref(), Some("ltr"));
    assert_eq!(doc.attribute("lang").as_deref(), Some("fr"));
    assert_eq!(doc.opacity(), 1.0);
    assert!(!controller.is_transition_active());

    let metrics = controller.metrics();
    assert_eq!(metrics.transitions_started.load(Ordering::Relaxed), 4);
    assert_eq!(metrics.transitions_superseded.load(Ordering::Relaxed), 3);
}

#[tokio::test(start_paused = true)]
async fn test_superseding_fade_continues_from_current_opacity() {
    let (controller, doc) = controller_with_document();

    controller.set_locale(Locale::Ar);
    sleep(Duration::from_millis(100)).await;
    let before = doc.opacity();

    controller.set_locale(Locale::En);
    let writes_at_flip = doc.writes().len();
    sleep(Duration::from_millis(1)).await;

    // The new timeline's first frame picks up where the old one stopped
    let first_new_frame = doc.writes()[writes_at_flip..]
        .iter()
        .find_map(|w| match w {
            DocumentWrite::Opacity(value) => Some(*value),
            DocumentWrite::Attribute { .. } => None,
        })
        .expect("no frame written after flip");
    assert_eq!(first_new_frame, before);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timeline_from_settings() {
    let settings = TransitionSettings {
        fade_out_ms: 40,
        fade_in_ms: 60,
        frame_interval_ms: 10,
    };
    let doc = Arc::new(MemoryDocument::new());
    let controller = LocaleController::with_timeline(
        tokio::runtime::Handle::current(),
        Locale::En,
        FadeTransition::from(&settings),
    )
    .with_document(doc.clone());

    controller.set_locale(Locale::Ar);
    sleep(Duration::from_millis(150)).await;

    assert!(!controller.is_transition_active());
    assert_eq!(doc.opacity(), 1.0);
}

#[tokio::test]
async fn test_unknown_code_is_ignored() {
    let (controller, doc) = controller_with_document();

    assert!(controller.set_locale_code("xx").is_err());
    assert_eq!(controller.current_locale(), Locale::En);
    assert!(doc.writes().is_empty());

    let changes = controller.set_locale_code("ar").unwrap();
    assert_eq!(changes.len(), 2);
    assert!(controller.is_rtl());
}

#[test]
fn test_controller_on_dedicated_runtime() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let doc = Arc::new(MemoryDocument::new());
    let controller = LocaleController::new(runtime.handle().clone()).with_document(doc.clone());

    // Called from a non-runtime thread, like a GUI callback
    controller.set_locale(Locale::Ar);
    std::thread::sleep(std::time::Duration::from_millis(800));

    assert_eq!(doc.opacity(), 1.0);
    assert!(!controller.is_transition_active());

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
}

#[test]
fn test_concurrent_flips_leave_dir_matching_state() {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for _ in 0..50 {
        let doc = Arc::new(MemoryDocument::new());
        let controller = Arc::new(
            LocaleController::new(runtime.handle().clone()).with_document(doc.clone()),
        );

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let controller = Arc::clone(&controller);
                std::thread::spawn(move || {
                    for i in 0..20 {
                        let locale = if (t + i) % 2 == 0 { Locale::Ar } else { Locale::Fr };
                        controller.set_locale(locale);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let expected = controller.direction().as_str().to_string();
        assert_eq!(doc.attribute("dir"), Some(expected));
        controller.cancel_transition();
    }

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
}
