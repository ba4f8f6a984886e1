use std::path::Path;

use console::Style;
use redraw_core::params::RedrawMode;
use redraw_core::session::Session;
use redraw_core::settings::Settings;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_presets(modes: &[RedrawMode]) {
    let s = Styles::new();
    print_title(&s, "Redraw Presets");

    for &mode in modes {
        let preset = mode.preset();
        println!(
            "  {} {}",
            s.header.apply_to(preset.label),
            s.label.apply_to(format!("({})", mode.key()))
        );
        println!("    {}", s.label.apply_to(preset.description));
        println!(
            "    {:<14}{}",
            s.label.apply_to("Denoise"),
            s.value.apply_to(format!("{:.2}", preset.params.denoising_strength))
        );
        println!(
            "    {:<14}{}",
            s.label.apply_to("Mask blur"),
            s.value.apply_to(format!("{} px", preset.params.mask_blur))
        );
        println!(
            "    {:<14}{}",
            s.label.apply_to("Padding"),
            s.value.apply_to(format!("{} px", preset.params.padding))
        );
        println!(
            "    {:<14}{}",
            s.label.apply_to("Content"),
            s.method.apply_to(preset.params.mask_content)
        );
        println!(
            "    {:<14}{}",
            s.label.apply_to("Area"),
            s.method.apply_to(preset.params.inpaint_area)
        );
        println!();
    }
}

pub fn print_settings(settings: &Settings, path: &Path) {
    let s = Styles::new();
    print_title(&s, "Settings");

    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(path.display()));
    if settings.has_credential() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("API key"),
            s.value.apply_to(settings.masked_key())
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("API key"),
            s.disabled.apply_to("not set")
        );
    }
    println!("  {:<14}{}", s.label.apply_to("Model"), s.method.apply_to(settings.model));
    println!("  {:<14}{}", s.label.apply_to("Endpoint"), s.path.apply_to(&settings.endpoint));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Timeout"),
        s.value.apply_to(format!("{} s", settings.timeout_secs))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(settings.default_mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Undo history"),
        s.value.apply_to(format!("{} steps", settings.history_limit))
    );
    println!();
}

pub fn print_request_summary(session: &Session, input: &Path, output: &Path) {
    let s = Styles::new();
    print_title(&s, "Manga Redraw");

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!("  {:<14}{}", s.label.apply_to("Model"), s.method.apply_to(session.model()));
    println!("  {:<14}{}", s.label.apply_to("Mode"), s.method.apply_to(session.mode()));
    println!();

    if let Some(stats) = session.mask_stats() {
        println!("  {}", s.header.apply_to("Mask"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Masked"),
            s.value.apply_to(format!(
                "{} px ({:.2}%)",
                stats.masked_pixels,
                stats.fraction() * 100.0
            ))
        );
        match stats.padded_bounds {
            Some(r) => println!(
                "    {:<12}{}",
                s.label.apply_to("Region"),
                s.value.apply_to(format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y))
            ),
            None => println!(
                "    {:<12}{}",
                s.label.apply_to("Region"),
                s.disabled.apply_to("empty")
            ),
        }
        println!();
    }

    let params = session.params();
    println!("  {}", s.header.apply_to("Parameters"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Denoise"),
        s.value.apply_to(format!("{:.2}", params.denoising_strength))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Blur"),
        s.value.apply_to(format!("{} px", params.mask_blur))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Padding"),
        s.value.apply_to(format!("{} px", params.padding))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Content"),
        s.method.apply_to(params.mask_content)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Area"),
        s.method.apply_to(params.inpaint_area)
    );
    println!();
}
