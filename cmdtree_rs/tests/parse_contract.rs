//! Parse contract through the public API only.

use std::cell::RefCell;
use std::rc::Rc;

use cmdtree::{Arity, CATCH_ALL, Error, OptionSpec, Program, Value, coerce};

fn argv(tokens: &[&str]) -> Vec<String> {
    ["node", "script"]
        .iter()
        .chain(tokens)
        .map(|s| s.to_string())
        .collect()
}

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn arity_follows_brackets() {
    assert_eq!(OptionSpec::parse("-p, --port <n>", "").arity(), Arity::RequiredValue);
    assert_eq!(OptionSpec::parse("--color [when]", "").arity(), Arity::OptionalValue);
    assert_eq!(OptionSpec::parse("-v|--verbose", "").arity(), Arity::Boolean);
}

#[test]
fn negated_and_plain_booleans() {
    let mut program = Program::new("pizza");
    let root = program.root();
    program
        .option(root, "--no-sauce", "no sauce")
        .option(root, "--cheese", "extra cheese");

    program.parse(argv(&["--no-sauce", "--cheese"])).unwrap();
    assert_eq!(program.value(root, "sauce"), Some(&Value::Bool(false)));
    assert_eq!(program.value(root, "cheese"), Some(&Value::Bool(true)));
}

#[test]
fn required_value_leaves_positional_tokens() {
    let mut program = Program::new("tool");
    let root = program.root();
    program.option(root, "--port <n>", "port");

    program.parse(argv(&["--port", "8080", "build"])).unwrap();
    assert_eq!(program.value(root, "port"), Some(&Value::from("8080")));
    assert_eq!(program.args(), ["build"]);
    assert_eq!(program.raw_args().len(), 5);
}

#[test]
fn fatal_conditions_stop_the_parse() {
    let mut program = Program::new("tool");
    let root = program.root();
    program
        .option(root, "--timeout <ms>", "timeout")
        .option(root, "--verbose", "chatty");

    let err = program.parse(argv(&["-x", "--verbose"])).unwrap_err();
    assert!(matches!(err, Error::UnknownOption { ref token, .. } if token == "-x"));
    assert_eq!(program.value(root, "verbose"), None);

    let err = program.parse(argv(&["--timeout"])).unwrap_err();
    assert!(matches!(err, Error::OptionMissingArgument { got: None, .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn action_receives_positional_arguments() {
    let mut program = Program::new("tool");
    let root = program.root();
    let deploy = program.command(root, "deploy <target> [env]");
    let calls = log();
    let sink = Rc::clone(&calls);
    program
        .action(deploy, move |args| {
            sink.borrow_mut().push(args.join(" "));
            Ok(())
        })
        .unwrap();

    program.parse(argv(&["deploy", "prod"])).unwrap();
    program.parse(argv(&["deploy", "prod", "eu"])).unwrap();
    assert_eq!(*calls.borrow(), ["prod", "prod eu"]);

    let err = program.parse(argv(&["deploy"])).unwrap_err();
    assert!(matches!(err, Error::MissingArgument(ref slot) if slot == "target"));
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn catch_all_fires_before_the_command_event() {
    let mut program = Program::new("tool");
    let root = program.root();
    let build = program.command(root, "build");
    let events = log();

    let sink = Rc::clone(&events);
    program.on(root, CATCH_ALL, move |event, _| {
        sink.borrow_mut().push(format!("*:{}", event.tokens().join(",")));
        Ok(())
    });
    let sink = Rc::clone(&events);
    program
        .action(build, move |args| {
            sink.borrow_mut().push(format!("build:{}", args.join(",")));
            Ok(())
        })
        .unwrap();

    program.parse(argv(&["build", "fast"])).unwrap();
    assert_eq!(*events.borrow(), ["*:build,fast", "build:fast"]);
}

#[test]
fn unknown_leading_token_is_silent() {
    let mut program = Program::new("tool");
    let root = program.root();
    let deploy = program.command(root, "deploy <target>");
    let calls = log();
    let sink = Rc::clone(&calls);
    program
        .action(deploy, move |args| {
            sink.borrow_mut().push(args.join(" "));
            Ok(())
        })
        .unwrap();

    program.parse(argv(&["frobnicate"])).unwrap();
    assert!(calls.borrow().is_empty());
}

#[test]
fn duplicate_declarations_both_fire() {
    let mut program = Program::new("tool");
    let root = program.root();
    let first = log();
    let sink = Rc::clone(&first);
    program
        .option(root, "--level <n>", "as text")
        .option_with(root, "--level <n>", "as number", move |raw| {
            sink.borrow_mut().push(raw.to_string());
            coerce::int(raw)
        });

    program.parse(argv(&["--level", "3"])).unwrap();
    assert_eq!(*first.borrow(), ["3"]);
    assert_eq!(program.value(root, "level"), Some(&Value::Int(3)));
}

#[test]
fn sub_command_options_are_scoped() {
    let mut program = Program::new("tool");
    let root = program.root();
    program.option(root, "--verbose", "chatty");
    let deploy = program.command(root, "deploy <target>");
    program.option(deploy, "-f, --force", "skip checks");
    program.action(deploy, |_| Ok(())).unwrap();

    program.parse(argv(&["deploy", "prod", "-f", "--verbose"])).unwrap();
    assert_eq!(program.value(deploy, "force"), Some(&Value::Bool(true)));
    assert_eq!(program.value(root, "verbose"), Some(&Value::Bool(true)));
    assert_eq!(program.value(root, "force"), None);

    let err = program.parse(argv(&["-f", "deploy", "prod"])).unwrap_err();
    assert!(matches!(err, Error::UnknownOption { ref token, .. } if token == "-f"));
}

#[test]
fn help_and_version_are_successful_terminations() {
    let mut program = Program::new("tool");
    let root = program.root();
    program.version("2.0.1").description(root, "does things");
    program.command(root, "build");

    let err = program.parse(argv(&["--version", "build"])).unwrap_err();
    assert!(matches!(err, Error::VersionRequested(ref v) if v == "2.0.1"));
    assert!(err.is_success());

    match program.parse(argv(&["-h"])).unwrap_err() {
        Error::HelpRequested(text) => {
            assert!(text.starts_with("\n  Usage: tool [options]\n"));
            assert!(text.contains("  Commands:"));
            assert!(text.contains("-h, --help"));
            assert!(text.contains("-v, --version"));
        }
        other => panic!("expected help, got {other:?}"),
    }
}

#[test]
fn failing_action_is_reported_with_command_name() {
    let mut program = Program::new("tool");
    let root = program.root();
    let publish = program.command(root, "publish");
    program
        .action(publish, |_| Err(anyhow::anyhow!("registry unreachable")))
        .unwrap();

    let err = program.parse(argv(&["publish"])).unwrap_err();
    assert_eq!(err.to_string(), "command `publish' failed: registry unreachable");
}

#[test]
fn unnamed_program_takes_script_basename() {
    let mut program = Program::new("");
    program.parse(["node", "/usr/local/bin/deployer"]).unwrap();
    assert_eq!(program.name(), "deployer");
}

#[test]
fn options_after_sub_command_fire_during_the_scan() {
    let mut program = Program::new("tool");
    let root = program.root();
    program.option(root, "--port <n>", "port");
    let deploy = program.command(root, "deploy <target>");
    let events = log();

    let sink = Rc::clone(&events);
    program.on(root, "port", move |event, _| {
        sink.borrow_mut().push(format!("port:{}", event.value().unwrap_or_default()));
        Ok(())
    });
    let sink = Rc::clone(&events);
    program.on(root, CATCH_ALL, move |event, _| {
        sink.borrow_mut().push(format!("*:{}", event.tokens().join(",")));
        Ok(())
    });
    program.action(deploy, |_| Ok(())).unwrap();

    let rest = program
        .parse_options(&argv(&["deploy", "--port", "8080", "prod"]))
        .unwrap();
    assert_eq!(rest, ["deploy", "prod"]);
    assert_eq!(*events.borrow(), ["port:8080"]);

    events.borrow_mut().clear();
    let err = program.parse(argv(&["deploy", "prod", "--port"])).unwrap_err();
    assert!(matches!(err, Error::OptionMissingArgument { got: None, .. }));
    assert!(events.borrow().is_empty());
}
