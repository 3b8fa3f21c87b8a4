//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use stockroom_core::{Inventory, InventoryState, Product, ProductDraft, ProductId};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::screens::products::toggle_verb;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::edit_dialog::EditDialog;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    inventory: Inventory,
    /// Latest store snapshot, used for permission checks and the header.
    state: Arc<InventoryState>,
    /// Catalog location shown in the status bar.
    source: String,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Open while the store has a product in `editing`.
    edit_dialog: Option<EditDialog>,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(inventory: Inventory, source: impl Into<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let source = source.into();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&source).into_iter().collect();
        let state = inventory.snapshot();

        Self {
            inventory,
            state,
            source,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            help_visible: false,
            edit_dialog: None,
            pending_confirm: None,
            notification: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.init_screens()?;

        let inventory = self.inventory.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(inventory, tx, cancel).await;
        });

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Modal layers get first pick; global
    /// keys come next; everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

        // Edit dialog captures all keys except Ctrl+C
        if let Some(dialog) = self.edit_dialog.as_mut() {
            if ctrl_c {
                return Ok(Some(Action::Quit));
            }
            return Ok(dialog.handle_key(key));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if ctrl_c {
            return Ok(Some(Action::Quit));
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('r') => return Ok(Some(Action::ToggleRole)),
            KeyCode::Char('R') => return Ok(Some(Action::Reload)),
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            KeyCode::Tab => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            KeyCode::BackTab => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.broadcast(action)?;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::StateUpdated(state) => self.apply_state(Arc::clone(state))?,

            Action::Reload => {
                info!("reloading catalog");
                crate::data_bridge::spawn_load(self.inventory.clone(), self.action_tx.clone());
            }

            Action::LoadFinished(result) => {
                let notification = match result {
                    Ok(count) => Notification::success(format!("Loaded {count} products")),
                    Err(message) => Notification::error(message.clone()),
                };
                self.action_tx.send(Action::Notify(notification))?;
            }

            Action::ToggleRole => {
                let role = self.inventory.toggle_role();
                self.refresh()?;
                self.action_tx
                    .send(Action::Notify(Notification::info(format!("Viewing as {role}"))))?;
            }

            // ── Row actions ───────────────────────────────────────────

            Action::RequestEdit(id) => {
                if self.permitted(id, InventoryState::can_edit, |_| "edit")?.is_some() {
                    self.inventory.begin_edit(id);
                    self.refresh()?;
                }
            }

            Action::RequestToggleDisabled(id) => {
                if let Some(product) = self.permitted(id, InventoryState::can_toggle, toggle_verb)? {
                    let verb = if product.is_disabled { "Enabled" } else { "Disabled" };
                    let message = format!("{verb} {}", product.name);
                    self.inventory.toggle_disabled(id);
                    self.refresh()?;
                    self.action_tx
                        .send(Action::Notify(Notification::success(message)))?;
                }
            }

            Action::RequestDelete(id) => {
                if let Some(product) = self.permitted(id, InventoryState::can_delete, |_| "delete")? {
                    let confirm = ConfirmAction::DeleteProduct {
                        id: id.clone(),
                        name: product.name,
                    };
                    self.action_tx.send(Action::ShowConfirm(confirm))?;
                }
            }

            // ── Edit dialog ───────────────────────────────────────────

            Action::SaveDraft(draft) => self.save_draft(draft)?,

            Action::CancelEdit => {
                self.inventory.cancel_edit();
                self.refresh()?;
            }

            // ── Confirm dialog ────────────────────────────────────────

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(&confirm)?;
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),
        }

        Ok(())
    }

    /// Send `action` to every screen, queueing follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Adopt a new store snapshot: keep the edit dialog in step with
    /// `editing` and forward the snapshot to every screen.
    fn apply_state(&mut self, state: Arc<InventoryState>) -> Result<()> {
        match state.editing_product() {
            Some(product) => {
                let reopen = self
                    .edit_dialog
                    .as_ref()
                    .is_none_or(|d| d.product_id() != &product.id);
                if reopen {
                    self.edit_dialog = Some(EditDialog::new(product));
                }
            }
            None => self.edit_dialog = None,
        }
        self.state = Arc::clone(&state);
        self.broadcast(&Action::StateUpdated(state))
    }

    /// Re-read the store right after a local mutation so the next frame
    /// reflects it without waiting on the bridge.
    fn refresh(&mut self) -> Result<()> {
        let snapshot = self.inventory.snapshot();
        if Arc::ptr_eq(&snapshot, &self.state) {
            return Ok(());
        }
        self.apply_state(snapshot)
    }

    /// The product behind `id` if the current role may act on it.
    /// Queues a warning otherwise.
    fn permitted(
        &self,
        id: &ProductId,
        allowed: impl Fn(&InventoryState, &Product) -> bool,
        verb: impl Fn(&Product) -> &'static str,
    ) -> Result<Option<Product>> {
        let Some(product) = self.state.product_by_id(id) else {
            return Ok(None);
        };
        if allowed(&self.state, product) {
            return Ok(Some(product.clone()));
        }
        let verb = verb(product);
        warn!(product = %id, verb, role = %self.state.role, "row action refused");
        self.action_tx.send(Action::Notify(Notification::warning(format!(
            "Not allowed to {verb} {}",
            product.name
        ))))?;
        Ok(None)
    }

    fn save_draft(&mut self, draft: &ProductDraft) -> Result<()> {
        let Some(dialog) = self.edit_dialog.as_mut() else {
            return Ok(());
        };
        if let Err(errors) = draft.validate() {
            debug!(%errors, "edit rejected");
            dialog.set_errors(errors);
            return Ok(());
        }
        match self.inventory.save_draft(draft) {
            Ok(()) => {
                self.refresh()?;
                self.action_tx.send(Action::Notify(Notification::success(format!(
                    "Saved {}",
                    draft.name.trim()
                ))))?;
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.refresh()?;
                self.action_tx
                    .send(Action::Notify(Notification::error(e.to_string())))?;
            }
        }
        Ok(())
    }

    fn execute_confirm(&mut self, confirm: &ConfirmAction) -> Result<()> {
        match confirm {
            ConfirmAction::DeleteProduct { id, name } => {
                let notification = if self.inventory.delete_product(id) {
                    Notification::success(format!("Deleted {name}"))
                } else {
                    Notification::warning(format!("{name} no longer exists"))
                };
                self.refresh()?;
                self.action_tx.send(Action::Notify(notification))?;
            }
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [header_area, content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, last = topmost
        if let Some(ref dialog) = self.edit_dialog {
            dialog.render(frame, area);
        }

        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let admin = self.state.is_admin();
        let badge = if admin { " ADMIN " } else { " USER " };
        let line = Line::from(vec![
            Span::styled(" stockroom ", theme::title_style()),
            Span::styled(badge, theme::role_badge(admin)),
            Span::styled("  r switch role", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = if self.state.loading {
            Span::styled("◐ loading", Style::default().fg(theme::ELECTRIC_YELLOW))
        } else if self.state.error.is_some() {
            Span::styled("○ load failed", Style::default().fg(theme::ERROR_RED))
        } else if self.state.last_loaded.is_some() {
            Span::styled("● loaded", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("○ idle", Style::default().fg(theme::DIM_WHITE))
        };

        let line = Line::from(vec![
            Span::raw(" "),
            indicator,
            Span::styled(format!(" {} ", self.source), theme::key_hint()),
            Span::styled("│ ? help  R reload  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let entry = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-2", "Jump to screen"),
            entry("Tab", "Next screen"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("g/G", "Top / bottom"),
            entry("Ctrl+d/u", "Page down / up"),
            Line::from(""),
            section("Products (admin)"),
            entry("e Enter", "Edit product"),
            entry("d", "Disable / enable"),
            entry("x Del", "Delete product"),
            Line::from(""),
            section("Global"),
            entry("r", "Switch admin / user"),
            entry("R", "Reload catalog"),
            entry("?", "This help"),
            entry("q", "Quit"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let message = format!("  {confirm}");
        let wanted = u16::try_from(message.chars().count() + 4).unwrap_or(u16::MAX);
        let width = wanted.clamp(40, 70).min(area.width.saturating_sub(4));
        let height = 5u16;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ELECTRIC_YELLOW));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(message, Style::default().fg(theme::DIM_WHITE))),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 60)
            .min(area.width);
        let height = 3u16;
        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{render_to_string, sample_state};
    use pretty_assertions::assert_eq;
    use stockroom_core::{CatalogConfig, DraftField, Role, StoreAction};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// An app over a pre-loaded store. No network is touched.
    fn app() -> App {
        let inventory = Inventory::new(CatalogConfig::default()).unwrap();
        let seeded = sample_state();
        inventory.store().dispatch(StoreAction::LoadSucceeded {
            products: seeded.products,
            at: chrono::Utc::now(),
        });
        let mut app = App::new(inventory, "test");
        let snapshot = app.inventory.snapshot();
        app.process_action(&Action::StateUpdated(snapshot)).unwrap();
        app
    }

    /// Process every queued action, returning the notifications seen.
    fn drain(app: &mut App) -> Vec<Notification> {
        let mut seen = Vec::new();
        while let Ok(action) = app.action_rx.try_recv() {
            if let Action::Notify(n) = &action {
                seen.push(n.clone());
            }
            app.process_action(&action).unwrap();
        }
        seen
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
        drain(app);
    }

    fn id(name: &str) -> ProductId {
        ProductId::new(name)
    }

    #[test]
    fn role_key_toggles_between_admin_and_user() {
        let mut app = app();
        assert_eq!(app.state.role, Role::Admin);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.role, Role::User);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.role, Role::Admin);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app();
        app.process_action(&Action::RequestDelete(id("Bluetooth"))).unwrap();
        drain(&mut app);
        assert!(app.pending_confirm.is_some());
        assert!(app.state.product_by_id(&id("Bluetooth")).is_some());

        press(&mut app, KeyCode::Char('y'));
        assert!(app.pending_confirm.is_none());
        assert!(app.state.product_by_id(&id("Bluetooth")).is_none());
        assert_eq!(app.state.products.len(), 4);
    }

    #[test]
    fn declining_confirmation_keeps_product() {
        let mut app = app();
        app.process_action(&Action::RequestDelete(id("Bluetooth"))).unwrap();
        drain(&mut app);
        press(&mut app, KeyCode::Esc);
        assert!(app.pending_confirm.is_none());
        assert_eq!(app.state.products.len(), 5);
    }

    #[test]
    fn user_role_cannot_mutate() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));

        app.process_action(&Action::RequestDelete(id("Bluetooth"))).unwrap();
        app.process_action(&Action::RequestToggleDisabled(id("Bluetooth")))
            .unwrap();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();
        let notes = drain(&mut app);

        assert!(app.pending_confirm.is_none());
        assert!(app.edit_dialog.is_none());
        assert!(!app.state.products[&id("Bluetooth")].is_disabled);
        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|n| n.level == NotificationLevel::Warning));
    }

    #[test]
    fn refusal_names_the_toggle_direction() {
        let mut app = app();
        app.process_action(&Action::RequestToggleDisabled(id("Bluetooth")))
            .unwrap();
        drain(&mut app);
        press(&mut app, KeyCode::Char('r'));

        app.process_action(&Action::RequestToggleDisabled(id("Bluetooth")))
            .unwrap();
        let notes = drain(&mut app);
        assert_eq!(notes[0].message, "Not allowed to enable Bluetooth");
    }

    #[test]
    fn refusal_surfaces_closed_action_channel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        app.action_tx = tx;

        assert!(app.process_action(&Action::RequestDelete(id("Bluetooth"))).is_err());
    }

    #[test]
    fn save_after_product_vanished_reports_error() {
        let mut app = app();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();
        let draft = ProductDraft::from_product(&app.state.products[&id("Bluetooth")]);

        // A reload lands in the store before the bridge forwards it
        let mut remaining = sample_state().products;
        remaining.shift_remove(&id("Bluetooth"));
        app.inventory.store().dispatch(StoreAction::LoadSucceeded {
            products: remaining,
            at: chrono::Utc::now(),
        });

        app.process_action(&Action::SaveDraft(draft)).unwrap();
        let notes = drain(&mut app);
        assert!(app.edit_dialog.is_none());
        assert!(!notes.is_empty());
        assert!(notes.iter().all(|n| n.level == NotificationLevel::Error));
        assert!(!notes.iter().any(|n| n.message.starts_with("Saved")));
        assert_eq!(app.state.products.len(), 4);
    }

    #[test]
    fn toggle_disabled_flips_flag() {
        let mut app = app();
        app.process_action(&Action::RequestToggleDisabled(id("Bluetooth")))
            .unwrap();
        let notes = drain(&mut app);
        assert!(app.state.products[&id("Bluetooth")].is_disabled);
        assert_eq!(notes[0].message, "Disabled Bluetooth");

        // Disabled rows cannot be edited, even by admins
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();
        drain(&mut app);
        assert!(app.edit_dialog.is_none());
    }

    #[test]
    fn edit_dialog_follows_store() {
        let mut app = app();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();
        assert!(app.edit_dialog.is_some());
        assert!(app.state.is_edit_dialog_open());

        // Keys go to the dialog while it is open: 'q' is typed, not quit
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        press(&mut app, KeyCode::Esc);
        assert!(app.edit_dialog.is_none());
        assert!(!app.state.is_edit_dialog_open());
        assert_eq!(app.state.products[&id("Bluetooth")].name, "Bluetooth");
    }

    #[test]
    fn invalid_draft_keeps_dialog_open() {
        let mut app = app();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();

        let draft = ProductDraft {
            name: "Bluetooth".into(),
            category: "Electronic".into(),
            price: "$150".into(),
            quantity: "many".into(),
        };
        app.process_action(&Action::SaveDraft(draft)).unwrap();
        drain(&mut app);

        let dialog = app.edit_dialog.as_ref().unwrap();
        assert!(dialog.errors().get(DraftField::Quantity).is_some());
        assert!(app.state.is_edit_dialog_open());
        assert_eq!(app.state.products[&id("Bluetooth")].quantity, 5);
    }

    #[test]
    fn valid_draft_saves_and_closes() {
        let mut app = app();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();

        let draft = ProductDraft {
            name: "Bluetooth Speaker".into(),
            category: "Electronic".into(),
            price: "$175".into(),
            quantity: "12".into(),
        };
        app.process_action(&Action::SaveDraft(draft)).unwrap();
        let notes = drain(&mut app);

        assert!(app.edit_dialog.is_none());
        let saved = &app.state.products[&id("Bluetooth")];
        assert_eq!(saved.name, "Bluetooth Speaker");
        assert_eq!(saved.quantity, 12);
        assert!((saved.price.amount() - 175.0).abs() < f64::EPSILON);
        assert_eq!(notes[0].message, "Saved Bluetooth Speaker");
    }

    #[test]
    fn load_finished_notifies() {
        let mut app = app();
        app.process_action(&Action::LoadFinished(Err("Failed to fetch products".into())))
            .unwrap();
        let notes = drain(&mut app);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Failed to fetch products");
    }

    #[test]
    fn number_keys_switch_screens() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_screen, ScreenId::Products);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_screen, ScreenId::Dashboard);
    }

    #[test]
    fn quit_and_help_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        // 'q' is swallowed while help is open
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn renders_header_and_overlays() {
        let mut app = app();
        app.process_action(&Action::RequestEdit(id("Bluetooth"))).unwrap();
        let text = render_to_string(120, 30, |f| app.render(f));
        assert!(text.contains("ADMIN"));
        assert!(text.contains("Edit Bluetooth"));
        assert!(text.contains("Store Value"));
    }
}
