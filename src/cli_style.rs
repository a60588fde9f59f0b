use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

use event_finder_server::client::{Toast, ToastKind};

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb {
        r: 255,
        g: 196,
        b: 0,
    };
    pub const CORAL: Color = Color::Rgb {
        r: 255,
        g: 111,
        b: 97,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 214,
        b: 143,
    };
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

mod glyphs {
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const INFO: &str = "ℹ";
    pub const HEART: &str = "♥";
    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const HORIZONTAL: &str = "─";
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner(gateway_url: &str) {
    println!();
    println!(
        "  {} {}",
        glyphs::HEART.with(colors::CORAL).bold(),
        "EVENT FINDER".with(colors::GOLD).bold()
    );
    println!(
        "  {}",
        format!("gateway: {}", gateway_url).with(colors::DIM)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        glyphs::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        glyphs::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_info(message: &str) {
    println!(
        " {} {}",
        glyphs::INFO.with(colors::BLUE).bold(),
        message.with(colors::BLUE)
    );
}

pub fn print_toast(toast: &Toast) {
    match toast.kind {
        ToastKind::Success => print_success(&toast.message),
        ToastKind::Info => print_info(&toast.message),
    }
    if let Some(sub_message) = &toast.sub_message {
        println!("   {}", sub_message.as_str().with(colors::DIM));
    }
    if let Some(action) = &toast.action {
        println!(
            "   {}",
            format!("type `undo` to {}", action.label().to_lowercase()).with(colors::GOLD)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_section_header(title: &str) {
    let width: usize = 60;
    let fill = width.saturating_sub(title.width() + 2);

    println!();
    println!(
        "{}{} {} {}{}",
        glyphs::ROUND_TOP_LEFT.with(colors::GOLD),
        glyphs::HORIZONTAL.with(colors::GOLD),
        title.with(colors::GOLD).bold().attribute(Attribute::Italic),
        glyphs::HORIZONTAL.repeat(fill).with(colors::GOLD),
        glyphs::ROUND_TOP_RIGHT.with(colors::GOLD)
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::BULLET.with(colors::CORAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_list_item(index: usize, item: &str, highlighted: bool) {
    let marker = if highlighted {
        glyphs::HEART.with(colors::CORAL)
    } else {
        glyphs::ARROW_RIGHT.with(colors::GOLD)
    };
    println!(
        "  {} {} {}",
        format!("{:>2}.", index).with(colors::DIM),
        marker,
        item.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        glyphs::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!("{} ", "events ❯".with(colors::GOLD).bold())
}
