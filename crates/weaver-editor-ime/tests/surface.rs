mod common;

use common::{RecordingHost, RecordingService, engine};
use insta::assert_snapshot;
use weaver_editor_core::{EditorDocument, EditorEngine, Insets, WindowInsets};
use weaver_editor_ime::{
    EditorInfo, ImeAction, InputClass, InputType, InsetDispatch, InputSurface, SurfaceConfig,
    SurfaceError,
};

type Surface = InputSurface<EditorEngine, RecordingService>;

fn surface(config: SurfaceConfig) -> Surface {
    InputSurface::new(config, RecordingService::default())
}

const INSETS: [i32; 12] = [0, 63, 0, 126, 0, 0, 0, 840, 0, 80, 0, 0];

#[test]
fn lifecycle_errors() {
    let mut surface = surface(SurfaceConfig::default());
    let mut info = EditorInfo::default();

    assert_eq!(
        surface.create_input_connection(&mut info).err(),
        Some(SurfaceError::NotAttached)
    );
    assert_eq!(surface.detach().err(), Some(SurfaceError::NotAttached));
    assert_eq!(
        surface.notify_selection_changed(),
        Err(SurfaceError::NotAttached)
    );

    surface.attach(engine("abc")).unwrap();
    assert!(surface.is_attached());
    assert_eq!(
        surface.attach(engine("")).err(),
        Some(SurfaceError::AlreadyAttached)
    );

    let engine = surface.detach().unwrap();
    assert_eq!(engine.document().len_chars(), 3);
    assert!(!surface.is_attached());
}

#[test]
fn input_connection_fills_editor_info() {
    let config = SurfaceConfig::default()
        .with_input_type(InputType::with_class(InputClass::Number))
        .with_ime_action(ImeAction::Done);
    let mut surface = surface(config);
    surface.attach(engine("🌍hello")).unwrap();

    let mut info = EditorInfo::default();
    let mut bridge = surface.create_input_connection(&mut info).unwrap();
    assert!(bridge.commit_text("!", 1));
    drop(bridge);

    assert_eq!(
        info,
        EditorInfo {
            input_type: 0x2,
            ime_options: 6,
            initial_sel_start: 7,
            initial_sel_end: 7,
        }
    );
}

#[test]
fn default_session_is_plain_text() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("")).unwrap();

    let mut info = EditorInfo::default();
    surface.create_input_connection(&mut info).unwrap();
    assert_eq!(info.input_type, 0x1);
    assert_eq!((info.initial_sel_start, info.initial_sel_end), (0, 0));
}

#[test]
fn selection_notifications_are_deduplicated() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("hello")).unwrap();

    assert_eq!(surface.notify_selection_changed(), Ok(true));
    assert_eq!(surface.notify_selection_changed(), Ok(false));

    {
        let mut bridge = surface.bridge().unwrap();
        assert!(bridge.set_composing_text("🌍", 1));
    }
    assert_eq!(surface.notify_selection_changed(), Ok(true));

    {
        let mut bridge = surface.bridge().unwrap();
        assert!(bridge.set_selection(0, 5));
    }
    assert_eq!(surface.notify_selection_changed(), Ok(true));
    assert_eq!(surface.notify_selection_changed(), Ok(false));

    assert_snapshot!(surface.service().calls.join("\n"), @r"
    update_selection 5 5 -1 -1
    update_selection 7 7 5 7
    update_selection 0 5 5 7
    ");
}

#[test]
fn session_start_resets_reported_selection() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("ab")).unwrap();

    let mut info = EditorInfo::default();
    surface.create_input_connection(&mut info).unwrap();

    // The session already knows this selection.
    assert_eq!(surface.notify_selection_changed(), Ok(false));
    assert!(surface.service().calls.is_empty());
}

#[test]
fn start_text_input_shows_or_restarts() {
    let mut surface = surface(SurfaceConfig::default());
    surface.start_text_input().unwrap();

    surface.service_mut().active = true;
    surface.start_text_input().unwrap();
    surface.end_text_input().unwrap();

    assert_snapshot!(surface.service().calls.join("\n"), @r"
    is_active
    show_soft_input 0
    is_active
    restart_input
    hide_soft_input 0
    ");
}

#[test]
fn start_text_input_respects_show_on_focus() {
    let config = SurfaceConfig::default().with_show_soft_input_on_focus(false);
    let mut surface = surface(config);
    surface.start_text_input().unwrap();
    assert_eq!(surface.service().calls, vec!["is_active".to_string()]);
}

#[test]
fn service_failures_surface_as_errors() {
    let mut surface = surface(SurfaceConfig::default());
    surface.service_mut().fail = true;

    assert!(matches!(
        surface.start_text_input(),
        Err(SurfaceError::Service(_))
    ));
    assert!(matches!(
        surface.end_text_input(),
        Err(SurfaceError::Service(_))
    ));
}

#[test]
fn insets_deferred_until_decor_attached() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("")).unwrap();
    let insets = WindowInsets::from_args(INSETS);

    assert_eq!(
        surface.apply_window_insets(&insets),
        Ok(InsetDispatch::Deferred)
    );
    assert_eq!(surface.host().unwrap().layout().revision(), 0);

    surface.on_decor_attached();
    assert_eq!(
        surface.apply_window_insets(&insets),
        Ok(InsetDispatch::Forwarded { consumed: true })
    );
    let engine = surface.host().unwrap();
    assert_eq!(engine.layout().revision(), 1);
    assert_eq!(engine.safe_area(), Insets::new(0, 80, 0, 840));
}

#[test]
fn repeated_insets_are_idempotent() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("")).unwrap();
    surface.on_decor_attached();
    let insets = WindowInsets::from_args(INSETS);

    surface.apply_window_insets(&insets).unwrap();
    let once = surface.host().unwrap().layout().clone();
    surface.apply_window_insets(&insets).unwrap();
    let twice = surface.host().unwrap().layout();

    assert_eq!(once.revision(), twice.revision());
    assert_eq!(once.insets(), twice.insets());
}

#[test]
fn insets_not_consumed_when_not_drawing_behind_bars() {
    let config = SurfaceConfig::default().with_draws_behind_system_bars(false);
    let mut surface = InputSurface::new(config, RecordingService::default());
    surface.attach(RecordingHost::default()).unwrap();
    surface.on_decor_attached();

    let dispatch = surface
        .apply_window_insets(&WindowInsets::from_args(INSETS))
        .unwrap();
    assert_eq!(dispatch, InsetDispatch::Forwarded { consumed: false });
    assert_snapshot!(
        surface.host().unwrap().calls.join("\n"),
        @"apply_window_insets [0, 63, 0, 126, 0, 0, 0, 840, 0, 80, 0, 0]"
    );
}

#[test]
fn reattached_engine_keeps_insets_registered() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("")).unwrap();
    surface.on_decor_attached();
    surface.detach().unwrap();

    assert_eq!(
        surface.apply_window_insets(&WindowInsets::default()),
        Err(SurfaceError::NotAttached)
    );

    surface.attach(engine("")).unwrap();
    assert_eq!(
        surface.apply_window_insets(&WindowInsets::from_args(INSETS)),
        Ok(InsetDispatch::Forwarded { consumed: true })
    );
    assert_eq!(surface.host().unwrap().layout().revision(), 1);

    surface.on_decor_detached();
    assert_eq!(
        surface.apply_window_insets(&WindowInsets::default()),
        Ok(InsetDispatch::Deferred)
    );
}

#[test]
fn failed_selection_report_is_retried() {
    let mut surface = surface(SurfaceConfig::default());
    surface.attach(engine("hello")).unwrap();

    surface.service_mut().fail = true;
    assert!(matches!(
        surface.notify_selection_changed(),
        Err(SurfaceError::Service(_))
    ));

    surface.service_mut().fail = false;
    assert_eq!(surface.notify_selection_changed(), Ok(true));
    assert_eq!(surface.notify_selection_changed(), Ok(false));

    assert_snapshot!(surface.service().calls.join("\n"), @r"
    update_selection 5 5 -1 -1
    update_selection 5 5 -1 -1
    ");
}
