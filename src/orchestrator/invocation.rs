//! Shell invocation strings for commands.

/// Shell used to run composed steps.
const SHELL: &str = "/bin/sh";

/// Build the invocation running `before` steps and `execute` in one shell.
///
/// CLI options are appended to `execute`, quoted only where needed. The
/// steps are chained with `&&` so state set up by `before` (an activated
/// virtualenv, exported variables) is visible to `execute`.
pub fn compose_invocation(before: &[String], execute: &str, options: &[String]) -> String {
    let mut line = execute.to_string();
    if !options.is_empty() {
        line.push(' ');
        line.push_str(&shell_words::join(options));
    }

    let steps: Vec<&str> = before
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(line.as_str()))
        .collect();
    wrap(&steps)
}

/// Build the host-side invocation for `after` steps, if there are any.
pub fn after_invocation(after: &[String]) -> Option<String> {
    if after.is_empty() {
        return None;
    }
    let steps: Vec<&str> = after.iter().map(String::as_str).collect();
    Some(wrap(&steps))
}

fn wrap(steps: &[&str]) -> String {
    let script = steps.join(" && ");
    format!("{} -c '{}'", SHELL, script.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_execute_only() {
        assert_eq!(compose_invocation(&[], "echo ok", &[]), "/bin/sh -c 'echo ok'");
    }

    #[test]
    fn test_before_steps_and_options() {
        let invocation = compose_invocation(
            &strings(&["echo BEFORE1", "echo BEFORE2"]),
            "pytest",
            &strings(&["--cov", "-k", "smoke and not slow"]),
        );
        assert_eq!(
            invocation,
            r#"/bin/sh -c 'echo BEFORE1 && echo BEFORE2 && pytest --cov -k '\''smoke and not slow'\'''"#
        );
    }

    #[test]
    fn test_single_quotes_are_escaped() {
        assert_eq!(
            compose_invocation(&[], "echo 'hi there'", &[]),
            r#"/bin/sh -c 'echo '\''hi there'\'''"#
        );
    }

    #[test]
    fn test_after_invocation() {
        assert_eq!(after_invocation(&[]), None);
        assert_eq!(
            after_invocation(&strings(&["echo AFTER1", "echo AFTER2"])),
            Some("/bin/sh -c 'echo AFTER1 && echo AFTER2'".to_string())
        );
    }
}
