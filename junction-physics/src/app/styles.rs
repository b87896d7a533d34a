use owo_colors::Style;

// Stylesheet used to colorize prints.
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub heading_style: Style,
    pub label_style: Style,
    pub value_style: Style,
    pub warning_style: Style,
}

impl Styles {
    /// A stylesheet which is only coloured when stdout is a colour terminal
    pub(crate) fn for_stdout() -> Self {
        let mut styles = Self::default();
        if supports_color::on(supports_color::Stream::Stdout).is_some() {
            styles.colorize();
        }
        styles
    }

    pub(crate) fn colorize(&mut self) {
        self.heading_style = Style::new().bright_blue().bold();
        self.label_style = Style::new().bright_green();
        self.value_style = Style::new().white();
        self.warning_style = Style::new().bright_red().bold();
    }
}
