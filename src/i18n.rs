// ==========================================
// Internationalization (i18n)
// ==========================================
// rust-i18n with English (default) and Hindi locales.
// Note: rust_i18n::i18n! is initialised in lib.rs
// ==========================================

/// Current process-wide locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale ("en" or "hi")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate without arguments
///
/// # Example
/// ```no_run
/// use om_readiness::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate with `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use om_readiness::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/schemes.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// Translate in an explicit locale, leaving the global locale untouched
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_args(mut text: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        text = text.replace(&placeholder, v);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The locale is global and tests run in parallel; serialize the
    // tests that switch it.
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("hi");
        assert_eq!(current_locale(), "hi");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("common.success"), "Operation successful");

        set_locale("hi");
        assert_eq!(t("common.success"), "कार्य सफल");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/schemes.csv")]);
        assert!(msg.contains("/tmp/schemes.csv"));
        assert!(msg.contains("File not found"));
    }

    #[test]
    fn test_translate_in_explicit_locale() {
        let msg = t_in("hi", "notify.more", &[("count", "2")]);
        assert!(msg.contains("2"));
        assert!(msg.contains("अन्य"));

        let msg = t_in("en", "notify.more", &[("count", "4")]);
        assert_eq!(msg, "... and 4 more");
    }
}
