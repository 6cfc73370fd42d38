//! Register host commands next to the built-ins and feed a few lines through.
//!
//! Run with `cargo run -p devconsole-commands --example custom_commands`.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use devconsole_commands::{builtin_registry, ConsoleOutput, Dispatch};

fn main() {
    let output = ConsoleOutput::stdout();
    let quit = Arc::new(AtomicBool::new(false));
    let counter = Arc::new(AtomicI64::new(0));

    let mut registry = builtin_registry(output.clone(), quit);

    // `add <n>` only accepts a single integer...
    let add = Arc::clone(&counter);
    registry.register_fn("add", move |args| {
        let [n] = args else { return false };
        let Ok(n) = n.parse::<i64>() else { return false };
        add.fetch_add(n, Ordering::SeqCst);
        true
    });
    // ...anything else falls through to this one.
    let usage = output.clone();
    registry.register_fn("add", move |_| {
        usage.line("usage: add <integer>");
        true
    });

    registry.with_help(output.clone());
    let console = registry.into_console("/");
    for line in ["/add 5", "/ADD 37", "/add five", "just chatting", "/help"] {
        let outcome = console.dispatch_line(line);
        if outcome == Dispatch::NotACommand {
            output.line(&format!("(chat) {line}"));
        }
    }
    output.line(&format!("counter = {}", counter.load(Ordering::SeqCst)));
}
