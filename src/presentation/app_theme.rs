use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

const PRIMARY_BLUE: Color = Color::from_rgb(0.094, 0.565, 1.0);
const SECONDARY_GRAY: Color = Color::from_rgb(0.88, 0.88, 0.9);
const DANGER_RED: Color = Color::from_rgb(0.85, 0.2, 0.2);
const DISABLED_GRAY: Color = Color::from_rgb(0.75, 0.75, 0.75);

pub fn get_theme() -> Theme {
    Theme::custom(
        "Snip".to_string(),
        iced::theme::Palette {
            background: Color::from_rgb(0.96, 0.96, 0.97),
            text: Color::from_rgb(0.1, 0.1, 0.1),
            primary: PRIMARY_BLUE,
            success: Color::from_rgb(0.1, 0.7, 0.3),
            danger: DANGER_RED,
            warning: Color::from_rgb(0.9, 0.6, 0.0),
        },
    )
}

fn shade(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r * factor).min(1.0),
        (color.g * factor).min(1.0),
        (color.b * factor).min(1.0),
    )
}

fn solid_button_style(base: Color, text_color: Color, status: button::Status) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Active => (base, text_color),
        button::Status::Hovered => (shade(base, 1.1), text_color),
        button::Status::Pressed => (shade(base, 0.8), text_color),
        button::Status::Disabled => (DISABLED_GRAY, Color::from_rgb(0.5, 0.5, 0.5)),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: background,
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: matches!(status, button::Status::Pressed),
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button_style(PRIMARY_BLUE, Color::WHITE, status)
}

pub fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button_style(SECONDARY_GRAY, Color::from_rgb(0.1, 0.1, 0.1), status)
}

pub fn danger_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    solid_button_style(DANGER_RED, Color::WHITE, status)
}
