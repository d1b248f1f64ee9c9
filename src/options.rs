//! Option-token utilities for runtime CLI option strings.
//!
//! Option strings from the config (`docker_run_options`,
//! `docker_build_options`, `docker_compose_options`) are split on
//! whitespace and inspected shallowly: a token starting with `-` is a flag
//! and the following token is its value unless that one is a flag too.
//! No deeper knowledge of docker's option grammar is assumed.

use log::debug;
use std::collections::BTreeMap;

/// Flag token → value (`None` for a bare flag).
pub type OptionMap = BTreeMap<String, Option<String>>;

/// Value appended by [`ensure_user`]; expanded by the host shell.
pub const HOST_USER: &str = "$(id -u):$(id -g)";

/// Split a raw option string on whitespace.
pub fn tokenize(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

/// Map every flag token to the value following it.
pub fn to_map(tokens: &[String]) -> OptionMap {
    let mut map = OptionMap::new();
    for (i, token) in tokens.iter().enumerate() {
        if !is_flag(token) {
            continue;
        }
        let value = tokens.get(i + 1).filter(|next| !is_flag(next)).cloned();
        map.insert(token.clone(), value);
    }
    map
}

/// Value of the first alias present with a value.
///
/// A bare flag (no value) does not count as an override.
pub fn lookup<'a>(map: &'a OptionMap, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| map.get(*alias).and_then(|value| value.as_deref()))
}

/// Run container processes as the invoking host user unless a user is set.
pub fn ensure_user(mut tokens: Vec<String>) -> Vec<String> {
    if !tokens.iter().any(|t| sets_user(t)) {
        tokens.push("--user".to_string());
        tokens.push(HOST_USER.to_string());
    }
    tokens
}

/// Drop interactive mode when stdin is not a terminal.
///
/// Removes standalone `-i`/`--interactive` tokens and strips `i` from
/// clusters of boolean short flags (`-it` becomes `-t`). With `-i` and no
/// TTY, docker runs on CI hang or fail.
pub fn strip_interactive(tokens: Vec<String>, stdin_is_tty: bool) -> Vec<String> {
    if stdin_is_tty {
        return tokens;
    }

    let joined = tokens.join(" ");
    let (kept, dropped) = split_interactive(tokens);
    if !dropped.is_empty() {
        debug!("{}", dropped_message(&dropped, &joined));
    }
    kept
}

/// Separate interactive-mode tokens from the rest.
///
/// Returns the remaining tokens and what was removed: whole tokens, or
/// `i` for a flag cluster that lost it.
fn split_interactive(tokens: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut dropped = Vec::new();
    for token in tokens {
        if token == "-i" || token == "--interactive" {
            dropped.push(token);
            continue;
        }
        if is_boolean_cluster(&token) && token.contains('i') {
            dropped.push(format!("i (from '{}')", token));
            let stripped: String = token.chars().filter(|c| *c != 'i').collect();
            if stripped != "-" {
                kept.push(stripped);
            }
            continue;
        }
        kept.push(token);
    }
    (kept, dropped)
}

fn dropped_message(dropped: &[String], joined: &str) -> String {
    format!(
        "the input device is not TTY, dropping {} from '{}'",
        dropped
            .iter()
            .map(|item| format!("'{}'", item))
            .collect::<Vec<_>>()
            .join(", "),
        joined
    )
}

/// `-u`/`--user`, with the value separate or attached (`-u0`, `--user=0`).
fn sets_user(token: &str) -> bool {
    token == "--user"
        || token.starts_with("--user=")
        || (token.starts_with("-u") && !token.starts_with("--"))
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Short flags of `docker run` that never take a value.
const BOOLEAN_SHORT_FLAGS: &str = "itdPq";

/// `-it` style: two or more boolean short flags behind a single dash.
fn is_boolean_cluster(token: &str) -> bool {
    token.strip_prefix('-').is_some_and(|rest| {
        rest.len() > 1 && rest.chars().all(|c| BOOLEAN_SHORT_FLAGS.contains(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        tokenize(Some(raw))
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokens("-it  -v .:/app\t-w /app"), vec!["-it", "-v", ".:/app", "-w", "/app"]);
        assert!(tokenize(None).is_empty());
        assert!(tokenize(Some("")).is_empty());
        assert!(tokenize(Some("   ")).is_empty());
    }

    #[test]
    fn test_to_map() {
        let map = to_map(&tokens("-f a.yml --tag"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("-f"), Some(&Some("a.yml".to_string())));
        assert_eq!(map.get("--tag"), Some(&None));
    }

    #[test]
    fn test_to_map_flag_followed_by_flag() {
        let map = to_map(&tokens("--rm -it image"));
        assert_eq!(map.get("--rm"), Some(&None));
        assert_eq!(map.get("-it"), Some(&Some("image".to_string())));
    }

    #[test]
    fn test_lookup_any_alias() {
        let map = to_map(&tokens("--tag my-tag"));
        assert_eq!(lookup(&map, &["-t", "--tag"]), Some("my-tag"));
        assert_eq!(lookup(&map, &["-f", "--file"]), None);
    }

    #[test]
    fn test_lookup_ignores_bare_flag() {
        let map = to_map(&tokens("--file"));
        assert_eq!(lookup(&map, &["-f", "--file"]), None);
    }

    #[test]
    fn test_ensure_user_appends_host_user() {
        assert_eq!(ensure_user(vec![]), vec!["--user", HOST_USER]);
        assert_eq!(ensure_user(tokens("-t")), vec!["-t", "--user", HOST_USER]);
    }

    #[test]
    fn test_ensure_user_keeps_explicit_user() {
        assert_eq!(ensure_user(tokens("-u 1000:1000")), vec!["-u", "1000:1000"]);
        assert_eq!(ensure_user(tokens("--user root")), vec!["--user", "root"]);
    }

    #[test]
    fn test_strip_interactive_without_tty() {
        assert_eq!(strip_interactive(tokens("-it"), false), vec!["-t"]);
        assert!(strip_interactive(tokens("-i"), false).is_empty());
        assert_eq!(strip_interactive(tokens("-i -t"), false), vec!["-t"]);
        assert!(strip_interactive(tokens("--interactive"), false).is_empty());
        assert_eq!(
            strip_interactive(tokens("--interactive --something-else"), false),
            vec!["--something-else"]
        );
        assert_eq!(
            strip_interactive(tokens("-it -v .:/app -w /app"), false),
            vec!["-t", "-v", ".:/app", "-w", "/app"]
        );
    }

    #[test]
    fn test_strip_interactive_leaves_values_and_long_flags() {
        // `/tmp/init` is a value, `--init` a different long flag.
        assert_eq!(
            strip_interactive(tokens("-v /tmp/init:/init --init"), false),
            vec!["-v", "/tmp/init:/init", "--init"]
        );
    }

    #[test]
    fn test_strip_interactive_with_tty_is_noop() {
        assert_eq!(strip_interactive(tokens("-it"), true), vec!["-it"]);
        assert_eq!(strip_interactive(tokens("-i -t"), true), vec!["-i", "-t"]);
    }

    #[test]
    fn test_ensure_user_keeps_attached_user_value() {
        assert_eq!(ensure_user(tokens("--user=1000:1000")), vec!["--user=1000:1000"]);
        assert_eq!(ensure_user(tokens("-u1000 -t")), vec!["-u1000", "-t"]);
        // `--userns` is a different option.
        assert_eq!(
            ensure_user(tokens("--userns host")),
            vec!["--userns", "host", "--user", HOST_USER]
        );
    }

    #[test]
    fn test_strip_interactive_keeps_attached_values() {
        assert_eq!(strip_interactive(tokens("-ubin"), false), vec!["-ubin"]);
        assert_eq!(strip_interactive(tokens("-wlib -itd"), false), vec!["-wlib", "-td"]);
    }

    #[test]
    fn test_split_interactive_reports_dropped() {
        let (kept, dropped) = split_interactive(tokens("-it --rm --interactive -i"));
        assert_eq!(kept, vec!["-t", "--rm"]);
        assert_eq!(dropped, vec!["i (from '-it')", "--interactive", "-i"]);

        let (kept, dropped) = split_interactive(tokens("-t --rm"));
        assert_eq!(kept, vec!["-t", "--rm"]);
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_dropped_message() {
        let dropped = vec!["i (from '-it')".to_string(), "--interactive".to_string()];
        assert_eq!(
            dropped_message(&dropped, "-it --interactive --rm"),
            "the input device is not TTY, dropping 'i (from '-it')', '--interactive' from '-it --interactive --rm'"
        );
    }
}
