#![no_main]

use libfuzzer_sys::fuzz_target;
use meow_issues::issue_command_parser::parse_cat_commands;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);
    for command in parse_cat_commands(&body) {
        assert!(command.name == "meow" || command.name == "meowvie");
        assert_eq!(command.arg, command.arg.trim());
        assert!(!command.arg.contains('\n'));
    }
});
