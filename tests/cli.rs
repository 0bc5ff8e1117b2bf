use std::process::{Command, Output};


fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_subcalc"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("SUBCALC_LOG", "off")
        .env_remove("SUBCALC_PREVIEW")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}


#[test]
fn test_report_mode() {
    let output = run(&["192.168.1.10", "255.255.255.0"]);
    assert_eq!(Some(0), output.status.code());

    let lines = stdout_lines(&output);
    assert_eq!(format!("{:<25}: {}", "IP Version", "IPv4"), lines[0]);
    assert!(lines.contains(&format!("{:<25}: {}", "Network Address", "192.168.1.0")));
    assert!(lines.contains(&format!("{:<25}: {}", "Usable Hosts", "254")));
    assert!(!lines.contains(&String::from("--- Subnetting ---")));
    assert_eq!("", stderr_text(&output));
}

#[test]
fn test_report_mode_with_subnets() {
    let output = run(&["10.0.0.1", "/8", "/10"]);
    assert_eq!(Some(0), output.status.code());

    let lines = stdout_lines(&output);
    assert!(lines.contains(&String::from("--- Subnetting ---")));
    assert!(lines.contains(&format!("{:<25}: {}", "Number of Subnets", "4 (using /10)")));
    assert!(lines.contains(&format!("{:<25}: {}", "Subnet 4", "10.192.0.0/10")));
}

#[test]
fn test_error_line() {
    let output = run(&["1.2.3", "24"]);
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
    assert_eq!(
        "error: invalid address \"1.2.3\": IP address has 3 chunk(s); expected 4 (invalid-address)\n",
        stderr_text(&output),
    );

    let output = run(&["10.0.0.0", "16", "12"]);
    assert_eq!(Some(1), output.status.code());
    assert!(stderr_text(&output).starts_with("error: "));
    assert!(stderr_text(&output).ends_with(" (child-prefix-not-larger)\n"));

    let output = run(&["10.0.0.0", "0.0.0.8"]);
    assert_eq!(Some(1), output.status.code());
    assert!(stderr_text(&output).ends_with(" (invalid-mask)\n"));
}

#[test]
fn test_list_mode() {
    let output = run(&["--list", "10.0.0.0", "8", "10", "2"]);
    assert_eq!(Some(0), output.status.code());
    assert_eq!(vec!["10.0.0.0/10", "10.64.0.0/10"], stdout_lines(&output));

    let output = run(&["-l", "10.0.0.0", "8", "10"]);
    assert_eq!(Some(0), output.status.code());
    assert_eq!(
        vec!["10.0.0.0/10", "10.64.0.0/10", "10.128.0.0/10", "10.192.0.0/10"],
        stdout_lines(&output),
    );

    // lazily cut off, even though the partition is enormous
    let output = run(&["--list", "::", "0", "128", "3"]);
    assert_eq!(Some(0), output.status.code());
    assert_eq!(vec!["::/128", "::1/128", "::2/128"], stdout_lines(&output));
}

#[test]
fn test_list_mode_usage_errors() {
    // no NEWPREFIX
    let output = run(&["--list", "10.0.0.0", "8"]);
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
    assert!(stderr_text(&output).contains("Usage:"));

    let output = run(&["--list", "10.0.0.0", "8", " "]);
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());

    let output = run(&["--list", "10.0.0.0", "8", "10", "many"]);
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());

    let output = run(&["--list", "10.0.0.0", "8", "40"]);
    assert_eq!(Some(1), output.status.code());
    assert!(stderr_text(&output).ends_with(" (prefix-out-of-range)\n"));
}

#[test]
fn test_help_and_missing_arguments() {
    let output = run(&["--help"]);
    assert_eq!(Some(0), output.status.code());
    assert!(stderr_text(&output).starts_with("Usage: subcalc ADDRESS MASK [NEWPREFIX]"));

    let output = run(&[]);
    assert_eq!(Some(1), output.status.code());

    let output = run(&["192.168.1.10"]);
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
}
