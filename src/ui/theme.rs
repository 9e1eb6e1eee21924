use ratatui::style::Color;

pub const BG_PRIMARY: Color = Color::Rgb(0, 0, 0);
pub const BG_PANEL: Color = Color::Rgb(12, 12, 12);
pub const FG_PRIMARY: Color = Color::Rgb(190, 190, 190);
pub const FG_DIM: Color = Color::Rgb(128, 128, 128);

pub const BAR_BG: Color = Color::Rgb(23, 52, 127);
pub const BAR_TEXT: Color = Color::Rgb(235, 240, 255);

pub const OVERLAY_BG: Color = Color::Rgb(79, 79, 79);
pub const OVERLAY_BORDER: Color = Color::Rgb(208, 208, 208);

pub const BORDER_IDLE: Color = Color::Rgb(61, 120, 120);
pub const BORDER_FOCUS: Color = Color::Rgb(187, 94, 0);
pub const PANEL_HIGHLIGHT_BG: Color = Color::Rgb(120, 160, 255);

pub const USER_FG: Color = Color::Rgb(120, 200, 255);
pub const ASSISTANT_FG: Color = Color::Rgb(150, 220, 150);
pub const SUCCESS_FG: Color = Color::Rgb(110, 210, 120);
pub const ERROR_FG: Color = Color::Rgb(235, 100, 100);
pub const BADGE_BG: Color = Color::Rgb(61, 61, 120);
