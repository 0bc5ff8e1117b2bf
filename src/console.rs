/// An ANSI color code for color terminals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    DarkYellow,
    Blue,
    Green,
    Red,
    White,
}

/// Turns off colored output for the rest of the run, regardless of the terminal.
#[cfg(feature = "console")]
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

#[cfg(not(feature = "console"))]
pub fn disable_colors() {
}

/// Pads text at the end with spaces to the given length. Text that is already long enough is
/// returned unchanged.
pub fn pad_end(text: &str, pad_to: usize) -> String {
    let mut padded = String::from(text);
    let char_count = padded.chars().count();
    for _ in char_count..pad_to {
        padded.push(' ');
    }
    padded
}

/// Styles text for output. Whether color is emitted depends on the stream the text is bound for.
#[cfg(feature = "console")]
fn colorize(text: String, color: Option<Color>, for_stderr: bool) -> String {
    let clr = match color {
        Some(c) => c,
        None => return text,
    };
    let mut styled = console::style(text);
    if for_stderr {
        styled = styled.for_stderr();
    }
    let colored = match clr {
        Color::DarkYellow => styled.yellow(),
        Color::Blue => styled.bright().blue(),
        Color::Green => styled.bright().green(),
        Color::Red => styled.bright().red(),
        Color::White => styled.bright().white(),
    };
    colored.to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(text: String, _color: Option<Color>, _for_stderr: bool) -> String {
    text
}

/// Outputs text to stdout, optionally in a given color, padded at the end to a specific length.
/// No newline is appended.
pub fn write_in_color<S: AsRef<str>>(text: S, color: Option<Color>, pad_to: usize) {
    print!("{}", colorize(pad_end(text.as_ref(), pad_to), color, false));
}

/// Like `write_in_color`, but to stderr.
pub fn ewrite_in_color<S: AsRef<str>>(text: S, color: Option<Color>, pad_to: usize) {
    eprint!("{}", colorize(pad_end(text.as_ref(), pad_to), color, true));
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pad_end() {
        assert_eq!("CIDR     ", pad_end("CIDR", 9));
        assert_eq!("Netmask", pad_end("Netmask", 3));
        assert_eq!("", pad_end("", 0));
    }

    // the color switches are process-wide
    #[cfg(feature = "console")]
    #[test]
    fn test_color_follows_target_stream() {
        disable_colors();
        assert_eq!("plain", colorize(String::from("plain"), Some(Color::Red), false));
        assert_eq!("plain", colorize(String::from("plain"), Some(Color::Red), true));
        assert_eq!("plain", colorize(String::from("plain"), None, false));

        // stdout is a terminal, stderr is redirected
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(false);
        assert_eq!("error:", colorize(String::from("error:"), Some(Color::Red), true));
        assert!(colorize(String::from("CIDR"), Some(Color::White), false).contains('\u{1b}'));

        // stdout is redirected, stderr is a terminal
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(true);
        assert!(colorize(String::from("error:"), Some(Color::Red), true).contains('\u{1b}'));
        assert_eq!("CIDR", colorize(String::from("CIDR"), Some(Color::White), false));

        disable_colors();
    }

    #[cfg(not(feature = "console"))]
    #[test]
    fn test_uncolored_passthrough() {
        disable_colors();
        assert_eq!("plain", colorize(String::from("plain"), Some(Color::Red), true));
        assert_eq!("plain", colorize(String::from("plain"), None, false));
    }
}
