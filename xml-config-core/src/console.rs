/// Line-oriented diagnostic sink for progress, warnings and overwrite notices.
///
/// Every place that accepts a console takes `Option<&dyn Console>`; passing
/// `None` silences diagnostics without changing results.
pub trait Console {
    fn write_line(&self, line: &str);
}

impl<F> Console for F
where
    F: Fn(&str),
{
    fn write_line(&self, line: &str) {
        self(line)
    }
}

/// Write `line` to `console` when there is one.
pub fn emit(console: Option<&dyn Console>, line: &str) {
    if let Some(console) = console {
        console.write_line(line);
    }
}
