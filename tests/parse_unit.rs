use minish::{extract_redirection, tokenize, Stream};

#[test]
fn tokenize_black_box() {
    assert_eq!(tokenize("ls -la /tmp"), vec!["ls", "-la", "/tmp"]);
    assert_eq!(tokenize("echo 'a b' c"), vec!["echo", "a b", "c"]);
}

#[test]
fn redirection_black_box() {
    let (command, spec) = extract_redirection("echo hi 2>> err.log");
    let spec = spec.expect("redirection");
    assert_eq!(command, "echo hi");
    assert_eq!(spec.stream, Stream::Stderr);
    assert_eq!(spec.path, "err.log");
    assert!(spec.append);
}

#[test]
fn extraction_then_tokenization() {
    let (command, spec) = extract_redirection("echo 'a  b' > out.txt");
    assert!(spec.is_some());
    assert_eq!(tokenize(&command), vec!["echo", "a  b"]);
}
