#![allow(unused_macros)]
//! Internal logging for rule loading.
//!
//! `analyzer_debug!` and `analyzer_warn!` take an event name of the form
//! `Component.Event` followed by at least one `key = value` attribute:
//!
//! ```text
//! analyzer_debug!(name: "EntityRule.Built", rule = "svc", label_key_count = 2);
//! ```
//!
//! Events go to `tracing` under the crate's target when `internal-logs` is
//! enabled. Test builds also print them, visible with `--nocapture`.

macro_rules! analyzer_event {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+) => {{
        #[cfg(feature = "internal-logs")]
        {
            tracing::$level!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+);
        }

        #[cfg(test)]
        {
            let mut line = format!("analyzer {}: {}", stringify!($level), $name);
            $(
                line.push_str(&format!(" {}={}", stringify!($key), $value));
            )+
            println!("{line}");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    }};
}

macro_rules! analyzer_debug {
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        analyzer_event!(debug, $name, $($key = $value),+)
    };
}

macro_rules! analyzer_warn {
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        analyzer_event!(warn, $name, $($key = $value),+)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn events_accept_borrowed_and_owned_values() {
        let rule = String::from("process_relation_tcp");

        analyzer_debug!(name: "EntityRule.Built", rule = rule.as_str(), label_key_count = 5usize);
        analyzer_warn!(
            name: "EntityRule.Invalid",
            rule = rule.as_str(),
            reason = format!("missing `{}`", "dest_process_id_key"),
        );

        assert_eq!(rule, "process_relation_tcp");
    }
}
