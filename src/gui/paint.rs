use crate::config::TextAlign;
use crate::icons::IconCache;
use crate::overlay::Section;
use crate::view::{
    ExternalLink, IconView, OverlayView, PageView, PanelBody, ProjectCardView, SocialButtonView,
};
use eframe::egui::{self, Align, Color32, Layout, RichText, Sense, Stroke};

const PROFILE_SIZE: f32 = 128.0;
const SOCIAL_SIZE: f32 = 48.0;
const PROJECT_ICON_SIZE: f32 = 44.0;
const PANEL_MAX_WIDTH: f32 = 480.0;
const BACKDROP_ALPHA: f32 = 160.0;
/// Distance the panel sinks while closing.
const CLOSE_SLIDE: f32 = 12.0;

/// Input produced by one frame of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Open(Section),
    Close,
    Backdrop { inside_panel: bool },
    Link(ExternalLink),
}

/// Draw the page. `close_progress` runs from 0 to 1 while the overlay closes.
pub fn page(
    ctx: &egui::Context,
    view: &PageView,
    icons: &IconCache,
    close_progress: f32,
) -> Vec<UiEvent> {
    let mut events = Vec::new();
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                profile_icon(ui, view, icons);
                ui.add_space(16.0);
                ui.label(RichText::new(&view.greeting).size(32.0).strong());
                ui.label(RichText::new(view.subtitle).size(16.0).weak());
                ui.add_space(12.0);
                divider(ui);
                ui.add_space(12.0);
                for nav in &view.nav {
                    let button = egui::Button::new(RichText::new(nav.label).size(15.0).strong())
                        .min_size(egui::vec2(200.0, 38.0))
                        .rounding(19.0);
                    if ui.add(button).clicked() {
                        events.push(UiEvent::Open(nav.section));
                    }
                    ui.add_space(6.0);
                }
            });
        });
    });
    if let Some(overlay) = &view.overlay {
        overlay_ui(ctx, overlay, icons, close_progress, &mut events);
    }
    events
}

fn profile_icon(ui: &mut egui::Ui, view: &PageView, icons: &IconCache) {
    let size = egui::vec2(PROFILE_SIZE, PROFILE_SIZE);
    match icons.texture(&view.icon_path) {
        Some(tex) => {
            ui.add(
                egui::Image::new(tex)
                    .fit_to_exact_size(size)
                    .rounding(PROFILE_SIZE / 2.0),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            let visuals = ui.visuals();
            ui.painter().circle(
                rect.center(),
                PROFILE_SIZE / 2.0,
                visuals.faint_bg_color,
                Stroke::new(2.0, visuals.widgets.inactive.bg_stroke.color),
            );
        }
    }
}

fn divider(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(64.0, 2.0), Sense::hover());
    ui.painter()
        .rect_filled(rect, 1.0, ui.visuals().widgets.inactive.bg_stroke.color);
}

fn overlay_ui(
    ctx: &egui::Context,
    overlay: &OverlayView,
    icons: &IconCache,
    close_progress: f32,
    events: &mut Vec<UiEvent>,
) {
    let screen = ctx.screen_rect();
    let opacity = (1.0 - close_progress).clamp(0.0, 1.0);

    let backdrop = egui::Area::new(egui::Id::new("overlay_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .movable(false)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, Sense::click());
            ui.painter().rect_filled(
                screen,
                0.0,
                Color32::from_black_alpha((BACKDROP_ALPHA * opacity) as u8),
            );
            response
        })
        .inner;

    let max_width = (screen.width() - 48.0).clamp(200.0, PANEL_MAX_WIDTH);
    let panel = egui::Area::new(egui::Id::new("overlay_panel"))
        .order(egui::Order::Foreground)
        .anchor(
            egui::Align2::CENTER_CENTER,
            egui::vec2(0.0, CLOSE_SLIDE * close_progress),
        )
        .movable(false)
        .show(ctx, |ui| {
            egui::Frame::window(ui.style())
                .inner_margin(20.0)
                .rounding(12.0)
                .show(ui, |ui| {
                    ui.set_width(max_width);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(overlay.title).size(22.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let close = egui::Button::new(RichText::new("×").size(22.0)).frame(false);
                            if ui.add(close).on_hover_text("Close").clicked() {
                                events.push(UiEvent::Close);
                            }
                        });
                    });
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .max_height(screen.height() * 0.7)
                        .show(ui, |ui| body(ui, &overlay.body, icons, events));
                });
        });

    if backdrop.clicked() {
        let panel_rect = panel.response.rect;
        let inside_panel = ctx
            .input(|i| i.pointer.interact_pos())
            .map_or(false, |pos| panel_rect.contains(pos));
        events.push(UiEvent::Backdrop { inside_panel });
    }
}

fn body(ui: &mut egui::Ui, body: &PanelBody, icons: &IconCache, events: &mut Vec<UiEvent>) {
    match body {
        PanelBody::About { text, align } => {
            aligned(ui, *align, |ui| {
                ui.add(egui::Label::new(RichText::new(text).size(15.0)).wrap(true));
            });
        }
        PanelBody::Socials {
            intro,
            align,
            buttons,
        } => {
            aligned(ui, *align, |ui| {
                ui.add(egui::Label::new(RichText::new(intro).size(15.0)).wrap(true));
            });
            ui.add_space(12.0);
            let row = Layout::left_to_right(Align::Center)
                .with_main_wrap(true)
                .with_main_align(main_align(*align));
            ui.with_layout(row, |ui| {
                for button in buttons {
                    social_button(ui, button, icons, events);
                }
            });
        }
        PanelBody::Projects { cards } => {
            for card in cards {
                project_card(ui, card, icons, events);
                ui.add_space(8.0);
            }
        }
    }
}

fn main_align(align: TextAlign) -> Align {
    match align {
        TextAlign::Left | TextAlign::Justify => Align::Min,
        TextAlign::Center => Align::Center,
        TextAlign::Right => Align::Max,
    }
}

fn aligned(ui: &mut egui::Ui, align: TextAlign, add: impl FnOnce(&mut egui::Ui)) {
    let layout = match align {
        TextAlign::Justify => Layout::top_down_justified(Align::Min),
        other => Layout::top_down(main_align(other)),
    };
    ui.with_layout(layout, add);
}

/// Paint `icon` into `rect`: the texture once loaded, the glyph when there is
/// no image or it failed, nothing while the download is pending.
fn paint_icon(ui: &egui::Ui, rect: egui::Rect, icon: &IconView, icons: &IconCache, text_size: f32) {
    if icon.image_visible() {
        if let Some(tex) = icon.image.as_deref().and_then(|url| icons.texture(url)) {
            egui::Image::new(tex).paint_at(ui, rect);
        }
        return;
    }
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        &icon.glyph,
        egui::FontId::proportional(text_size),
        ui.visuals().strong_text_color(),
    );
}

fn social_button(
    ui: &mut egui::Ui,
    button: &SocialButtonView,
    icons: &IconCache,
    events: &mut Vec<UiEvent>,
) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(SOCIAL_SIZE, SOCIAL_SIZE), Sense::click());
    let visuals = ui.style().interact(&response);
    ui.painter()
        .circle(rect.center(), SOCIAL_SIZE / 2.0, visuals.bg_fill, visuals.bg_stroke);
    paint_icon(ui, rect.shrink(12.0), &button.icon, icons, 20.0);
    let response = response
        .on_hover_text(&button.name)
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    if response.clicked() {
        events.push(UiEvent::Link(button.link.clone()));
    }
}

fn project_card(
    ui: &mut egui::Ui,
    card: &ProjectCardView,
    icons: &IconCache,
    events: &mut Vec<UiEvent>,
) {
    egui::Frame::group(ui.style())
        .rounding(10.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(PROJECT_ICON_SIZE, PROJECT_ICON_SIZE),
                    Sense::hover(),
                );
                ui.painter()
                    .rect_filled(rect, 8.0, ui.visuals().faint_bg_color);
                paint_icon(ui, rect.shrink(6.0), &card.icon, icons, 22.0);

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if link_button(ui).clicked() {
                        events.push(UiEvent::Link(card.link.clone()));
                    }
                    ui.with_layout(Layout::top_down(Align::Min), |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(RichText::new(&card.title).size(16.0).strong());
                            period_badge(ui, &card.period);
                        });
                        ui.add(egui::Label::new(RichText::new(&card.description).weak()).wrap(true));
                    });
                });
            });
        });
}

fn period_badge(ui: &mut egui::Ui, period: &str) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(8.0)
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                paint_clock(ui.painter(), rect, ui.visuals().weak_text_color());
                ui.label(RichText::new(period).small());
            });
        });
}

fn paint_clock(painter: &egui::Painter, rect: egui::Rect, color: Color32) {
    let stroke = Stroke::new(1.5, color);
    let c = rect.center();
    let r = rect.width() / 2.0 - 0.75;
    painter.circle_stroke(c, r, stroke);
    // Hands at 12 and roughly 4 o'clock, as in a 24-unit clock face.
    let unit = r / 10.0;
    painter.line_segment([c, c + egui::vec2(0.0, -6.0 * unit)], stroke);
    painter.line_segment([c, c + egui::vec2(4.0 * unit, 2.0 * unit)], stroke);
}

fn link_button(ui: &mut egui::Ui) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), Sense::click());
    let color = if response.hovered() {
        ui.visuals().hyperlink_color
    } else {
        ui.visuals().weak_text_color()
    };
    let stroke = Stroke::new(1.6, color);
    let r = rect.shrink(6.0);
    let corner = r.left_top() + egui::vec2(0.0, 4.0);
    let painter = ui.painter();
    // Open box.
    painter.line_segment([corner, r.left_bottom()], stroke);
    painter.line_segment([r.left_bottom(), r.right_bottom()], stroke);
    painter.line_segment([r.right_bottom(), r.right_bottom() - egui::vec2(0.0, 6.0)], stroke);
    painter.line_segment([corner, corner + egui::vec2(6.0, 0.0)], stroke);
    // Arrow.
    let tip = r.right_top();
    painter.line_segment([tip, tip + egui::vec2(-5.0, 0.0)], stroke);
    painter.line_segment([tip, tip + egui::vec2(0.0, 5.0)], stroke);
    painter.line_segment([tip, r.center()], stroke);
    response
        .on_hover_text("Open project")
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
