use beacon_core::{
    Accordion, ClickRegion, ColorScheme, FieldConstraints, FieldFeedback, FieldInput, FieldKind,
    FormController, FormPhase, KeyInput, KeyOutcome, MemoryPreferenceStore, ModalController,
    ModalTransition, NavKey, PageState, PreferenceStore, SubmitOutcome, THEME_STORAGE_KEY, Theme,
    ThemeController, TrapAction,
};

#[derive(Debug, Clone, Copy)]
enum ModalOp {
    Open,
    Close,
    Overlay,
    Content,
    Escape,
}

const OPS: [ModalOp; 5] = [
    ModalOp::Open,
    ModalOp::Close,
    ModalOp::Overlay,
    ModalOp::Content,
    ModalOp::Escape,
];

fn apply(modal: &mut ModalController, page: &mut PageState, op: ModalOp) -> ModalTransition {
    match op {
        ModalOp::Open => modal.open("modal-trigger", page),
        ModalOp::Close => modal.close(page),
        ModalOp::Overlay => modal.on_click(ClickRegion::Overlay, page),
        ModalOp::Content => modal.on_click(ClickRegion::Content, page),
        ModalOp::Escape => match modal.on_key(&KeyInput::new("Escape", false), page, || {
            (Vec::<u8>::new(), None)
        }) {
            KeyOutcome::Transition(t) => t,
            _ => ModalTransition::Ignored,
        },
    }
}

fn sequences(len: usize) -> Vec<Vec<ModalOp>> {
    if len == 0 {
        return vec![Vec::new()];
    }
    sequences(len - 1)
        .into_iter()
        .flat_map(|prefix| {
            OPS.into_iter().map(move |op| {
                let mut seq = prefix.clone();
                seq.push(op);
                seq
            })
        })
        .collect()
}

#[test]
fn scroll_lock_tracks_visibility_for_every_short_sequence() {
    // Checking after each step also covers every shorter prefix.
    for seq in sequences(5) {
        let mut modal = ModalController::new();
        let mut page = PageState::new();
        for op in &seq {
            let transition = apply(&mut modal, &mut page, *op);
            assert_eq!(
                page.scroll_locked(),
                modal.is_open(),
                "lock leaked after {seq:?}"
            );
            assert_eq!(
                page.background_inert(),
                modal.is_open(),
                "inert background leaked after {seq:?}"
            );
            if let ModalTransition::Closed { return_focus } = transition {
                assert_eq!(return_focus.as_deref(), Some("modal-trigger"));
            }
        }
    }
}

#[test]
fn trap_wraps_for_any_non_empty_set() {
    for len in 1..=6_u8 {
        let items: Vec<u8> = (0..len).collect();
        let first = items[0];
        let last = items[items.len() - 1];
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        modal.open("modal-trigger", &mut page);

        let forward = modal.on_key(&KeyInput::new("Tab", false), &mut page, || {
            (items.clone(), Some(last))
        });
        assert_eq!(forward, KeyOutcome::Trap(TrapAction::MoveTo(first)));

        let backward = modal.on_key(&KeyInput::new("Tab", true), &mut page, || {
            (items.clone(), Some(first))
        });
        assert_eq!(backward, KeyOutcome::Trap(TrapAction::MoveTo(last)));

        for middle in items.iter().copied().filter(|&i| i != first && i != last) {
            let outcome = modal.on_key(&KeyInput::new("Tab", false), &mut page, || {
                (items.clone(), Some(middle))
            });
            assert_eq!(outcome, KeyOutcome::Trap(TrapAction::Default));
        }
    }
}

#[test]
fn tab_from_outside_the_modal_lands_inside() {
    let items = vec!["close", "name", "send"];
    let mut page = PageState::new();
    let mut modal = ModalController::new();
    modal.open("modal-trigger", &mut page);
    for (shift, expected) in [(false, "close"), (true, "send")] {
        let outcome = modal.on_key(&KeyInput::new("Tab", shift), &mut page, || {
            (items.clone(), Some("body"))
        });
        assert_eq!(outcome, KeyOutcome::Trap(TrapAction::MoveTo(expected)));
    }
}

#[test]
fn accordion_home_end_and_bounds() {
    let mut acc = Accordion::new();
    for i in 0..4 {
        acc.push(&format!("trigger-{i}"), &format!("panel-{i}"), false);
    }
    for current in 0..4 {
        assert_eq!(acc.focus_target(current, NavKey::First), Some(0));
        assert_eq!(acc.focus_target(current, NavKey::Last), Some(3));
    }
    assert_eq!(acc.focus_target(0, NavKey::Previous), None);
    assert_eq!(acc.focus_target(3, NavKey::Next), None);
    assert!(acc.panels().iter().all(|p| !p.expanded));
}

fn contact_fields(name: &str, email: &str, message: &str) -> Vec<FieldInput> {
    vec![
        FieldInput::new(
            "name",
            FieldConstraints {
                required: true,
                ..FieldConstraints::default()
            },
            name,
        ),
        FieldInput::new(
            "email",
            FieldConstraints {
                required: true,
                kind: FieldKind::Email,
                min_length: None,
            },
            email,
        ),
        FieldInput::new(
            "message",
            FieldConstraints {
                required: true,
                kind: FieldKind::TextArea,
                min_length: Some(10),
            },
            message,
        ),
    ]
}

#[test]
fn valid_submission_completes_then_clears() {
    let mut form = FormController::default();
    let outcome = form.submit(&contact_fields("Ada", "ada@example.org", "Hello there!"));
    let SubmitOutcome::Started { ticket, .. } = outcome else {
        panic!("expected submission to start, got {outcome:?}");
    };
    assert!(form.is_busy());
    let done = form.complete(ticket).expect("completion");
    assert_eq!(
        done.message,
        "Message sent successfully! Thank you for reaching out."
    );
    assert!(!form.is_busy());
    assert!(form.clear(ticket));
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[test]
fn violated_constraints_never_disable_or_succeed() {
    let cases = [
        contact_fields("", "ada@example.org", "Hello there!"),
        contact_fields("Ada", "ada", "Hello there!"),
        contact_fields("Ada", "ada@example.org", "short"),
    ];
    for fields in cases {
        let mut form = FormController::default();
        assert!(matches!(
            form.submit(&fields),
            SubmitOutcome::Rejected { .. }
        ));
        assert!(!form.is_busy());
        assert_eq!(form.phase(), FormPhase::Idle);
    }
}

#[test]
fn empty_required_field_reports_required() {
    let feedback = FieldFeedback::evaluate(
        &FieldConstraints {
            required: true,
            ..FieldConstraints::default()
        },
        "",
    );
    assert!(feedback.invalid);
    assert_eq!(feedback.message.as_deref(), Some("This field is required"));
}

#[test]
fn theme_scenarios() {
    let theme = ThemeController::new(MemoryPreferenceStore::new(), ColorScheme::Dark);
    assert_eq!(theme.effective(), Theme::Dark);
    assert_eq!(theme.toggle_label(), "Light mode");

    let stored = MemoryPreferenceStore::with(THEME_STORAGE_KEY, "light");
    let theme = ThemeController::new(stored, ColorScheme::Dark);
    assert_eq!(theme.effective(), Theme::Light);
}

#[test]
fn double_toggle_is_identity() {
    for (stored, scheme) in [
        ("light", ColorScheme::Dark),
        ("dark", ColorScheme::Light),
        ("dark", ColorScheme::Dark),
    ] {
        let mut theme = ThemeController::new(
            MemoryPreferenceStore::with(THEME_STORAGE_KEY, stored),
            scheme,
        );
        let before = theme.effective();
        theme.toggle();
        theme.toggle();
        assert_eq!(theme.effective(), before);
        assert_eq!(
            theme.store().get(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some(stored)
        );
    }
}
