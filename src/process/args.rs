/*!
 * Argument Assembly
 * Turns an executable path and a flat argument string into an argv vector
 */

/// Split an argument string into discrete arguments.
///
/// Any run of whitespace is one delimiter, so consecutive spaces never
/// produce empty arguments. Tabs and newlines delimit too, unlike a
/// space-only `strtok` split where `"a\tb"` stays one argument. Quotes and
/// backslashes have no special meaning: `"a b"` becomes the two arguments
/// `"a` and `b"`.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    arguments.split_whitespace().map(str::to_owned).collect()
}

/// Build the full argv: the executable path as argument zero followed by the
/// split arguments.
pub fn build_argv(executable: &str, arguments: &str) -> Vec<String> {
    let mut argv = Vec::with_capacity(1 + arguments.len() / 2);
    argv.push(executable.to_owned());
    argv.extend(split_arguments(arguments));
    argv
}
