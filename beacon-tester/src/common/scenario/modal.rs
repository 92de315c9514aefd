use anyhow::{Result, bail, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{
    ClickRegion, FOCUSABLE_SELECTOR, KeyInput, KeyOutcome, ModalController, ModalTransition,
    PageState, SiteConfig, TrapAction,
};

const SEQUENCE_LEN: usize = 8;

pub struct ModalScenario;

/// Decode `seed` into a fixed-length op sequence (base 5 digits).
fn sequence(seed: usize) -> Vec<u8> {
    let mut n = seed;
    (0..SEQUENCE_LEN)
        .map(|_| {
            let op = u8::try_from(n % 5).unwrap_or(0);
            n /= 5;
            op
        })
        .collect()
}

fn step(modal: &mut ModalController, page: &mut PageState, op: u8) -> ModalTransition {
    match op {
        0 => modal.open("modal-trigger", page),
        1 => modal.close(page),
        2 => modal.on_click(ClickRegion::Overlay, page),
        3 => modal.on_click(ClickRegion::Content, page),
        _ => match modal.on_key(&KeyInput::new("Escape", false), page, || {
            (Vec::<usize>::new(), None)
        }) {
            KeyOutcome::Transition(t) => t,
            _ => ModalTransition::Ignored,
        },
    }
}

fn modal_check(iteration: usize) -> Result<()> {
    // Spread iterations across the sequence space.
    let seed = iteration.wrapping_mul(7919);
    let ops = sequence(seed);
    let mut modal = ModalController::new();
    let mut page = PageState::new();
    for op in &ops {
        let transition = step(&mut modal, &mut page, *op);
        ensure!(
            page.scroll_locked() == modal.is_open(),
            "scroll lock diverged from visibility after {ops:?}"
        );
        if let ModalTransition::Closed { return_focus } = transition {
            ensure!(
                return_focus.as_deref() == Some("modal-trigger"),
                "focus must return to the trigger"
            );
        }
    }

    let size = iteration % 6 + 1;
    let items: Vec<usize> = (0..size).collect();
    modal.open("modal-trigger", &mut page);
    let wrapped = modal.on_key(&KeyInput::new("Tab", false), &mut page, || {
        (items.clone(), Some(size - 1))
    });
    ensure!(
        wrapped == KeyOutcome::Trap(TrapAction::MoveTo(0)),
        "Tab from the last element must wrap to the first (size {size})"
    );
    let back = modal.on_key(&KeyInput::new("Tab", true), &mut page, || {
        (items.clone(), Some(0))
    });
    ensure!(
        back == KeyOutcome::Trap(TrapAction::MoveTo(size - 1)),
        "Shift+Tab from the first element must wrap to the last (size {size})"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ModalScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let selectors = SiteConfig::default().selectors;
        let trigger = format!("#{}", selectors.modal_trigger);
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        ctx.bridge.click(&trigger).await?;
        let state = ctx.bridge.state().await?;
        ensure!(state.modal_open, "modal should open from its trigger");
        ensure!(state.scroll_locked, "opening the modal should lock scrolling");
        ensure!(
            ctx.bridge
                .active_matches(&format!("#{} *", selectors.modal))
                .await?,
            "focus should move into the modal"
        );
        ensure!(
            ctx.bridge.attr(&format!("#{}", selectors.modal), "hidden").await?.is_none(),
            "open modal must not be hidden"
        );

        ensure!(state.background_inert, "the page behind the modal should be inert");

        // Real keystrokes: the browser moves focus and the trap wraps it.
        let modal = format!("#{}", selectors.modal);
        let (start, count) = ctx.bridge.focus_position(&modal, FOCUSABLE_SELECTOR).await?;
        let Some(start) = start else {
            bail!("focus should start on a focusable element of the modal");
        };
        ensure!(count > 0, "the modal has nothing to focus");
        for shift in [false, true] {
            let mut visited = vec![false; count];
            visited[start] = true;
            for press in 1..=count {
                ctx.bridge.press_tab(shift).await?;
                let (at, _) = ctx.bridge.focus_position(&modal, FOCUSABLE_SELECTOR).await?;
                let expected = if shift {
                    (start + count * press - press) % count
                } else {
                    (start + press) % count
                };
                ensure!(
                    at == Some(expected),
                    "{} #{press} should focus item {expected} of {count}, got {at:?}",
                    if shift { "Shift+Tab" } else { "Tab" }
                );
                visited[expected] = true;
            }
            ensure!(
                visited.iter().all(|seen| *seen),
                "a full cycle should reach every focusable element"
            );
        }

        ctx.bridge.key("Escape", false).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 After Escape: {state:?}");
        }
        ensure!(!state.modal_open, "Escape should close the modal");
        ensure!(!state.scroll_locked, "closing should release the scroll lock");
        ensure!(!state.background_inert, "closing should make the page interactive again");
        ensure!(
            ctx.bridge.active_id().await?.as_deref() == Some(selectors.modal_trigger.as_str()),
            "focus should return to the trigger"
        );
        Ok(())
    }
}

impl CombinedScenario for ModalScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Modal", modal_check))
    }
}
