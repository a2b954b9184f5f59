/// A blocking error message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub body: &'static str,
}

pub const RUNTIME_REQUIRED: Alert = Alert {
    title: "Java Required",
    body: "Java is needed for this program.\nPlease Install Java at https://www.java.com/en/download/.",
};

pub const LAUNCH_FAILED: Alert = Alert {
    title: "Error",
    body: "Failed to start the Java program.",
};

/// Shows `alert` as an application-modal error box and returns once the user
/// has dismissed it.
#[cfg(windows)]
pub fn show(alert: &Alert) {
    use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let body = wide(alert.body);
    let title = wide(alert.title);
    tracing::debug!(title = alert.title, "showing message box");
    unsafe { MessageBoxW(0, body.as_ptr(), title.as_ptr(), MB_ICONERROR | MB_OK) };
}

/// Writes `alert` to stderr. On an interactive terminal this blocks until a
/// key is pressed; without one there is nobody to acknowledge it.
#[cfg(not(windows))]
pub fn show(alert: &Alert) {
    let term = console::Term::stderr();
    tracing::debug!(title = alert.title, interactive = term.is_term(), "showing alert");
    let _ = term.write_line(&render(alert));
    if term.is_term() {
        let prompt = console::style("Press any key to continue...").dim().for_stderr();
        let _ = term.write_line(&prompt.to_string());
        let _ = term.read_key();
    }
}

#[cfg(windows)]
fn wide(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;

    OsStr::new(s).encode_wide().chain(once(0)).collect()
}

#[cfg(not(windows))]
fn render(alert: &Alert) -> String {
    format!(
        "{} {}\n{}",
        console::style("error:").red().bold().for_stderr(),
        console::style(alert.title).bold().for_stderr(),
        alert.body
    )
}
