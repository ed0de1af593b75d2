//! File operations on the NAS.

use crate::mcp::config::DEFAULT_COMMAND_TIMEOUT_SECS;
use crate::mcp::executor::CommandExecutor;
use crate::mcp::format::format_result;
use crate::mcp::types::FileExistsResponse;

/// Default directory listed by `list_files`.
pub const DEFAULT_LIST_PATH: &str = "~";

/// Build the `ls` command.
///
/// Long format uses `-lh`; hidden files add `a` to the flag group. An empty
/// path lists [`DEFAULT_LIST_PATH`].
pub fn list_files_command(path: &str, all: bool, long: bool) -> String {
    let path = if path.is_empty() { DEFAULT_LIST_PATH } else { path };
    let flags = match (long, all) {
        (true, true) => "-lha",
        (true, false) => "-lh",
        (false, true) => "-a",
        (false, false) => "",
    };

    if flags.is_empty() {
        format!("ls {}", path)
    } else {
        format!("ls {} {}", flags, path)
    }
}

/// Build the read command: `head` for positive `lines`, `tail` for negative,
/// `cat` for `None` or zero.
pub fn read_file_command(path: &str, lines: Option<i64>) -> String {
    match lines {
        Some(n) if n > 0 => format!("head -n {} {}", n, path),
        Some(n) if n < 0 => format!("tail -n {} {}", n.unsigned_abs(), path),
        _ => format!("cat {}", path),
    }
}

/// Quote `content` for use inside single quotes (`'` becomes `'\''`).
pub fn escape_single_quotes(content: &str) -> String {
    content.replace('\'', "'\\''")
}

/// Build the `echo` redirect that writes or appends `content` to `path`.
pub fn write_file_command(path: &str, content: &str, append: bool) -> String {
    let operator = if append { ">>" } else { ">" };
    format!("echo '{}' {} {}", escape_single_quotes(content), operator, path)
}

pub fn file_exists_command(path: &str) -> String {
    format!("test -e {} && echo 'exists' || echo 'not found'", path)
}

pub fn file_type_command(path: &str) -> String {
    format!("file {}", path)
}

/// List files and directories at `path`.
pub async fn list_files(executor: &CommandExecutor, path: &str, all: bool, long: bool) -> String {
    let result = executor
        .execute(&list_files_command(path, all, long), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

/// Read a whole file, or its first/last `lines` lines.
pub async fn read_file(executor: &CommandExecutor, path: &str, lines: Option<i64>) -> String {
    let result = executor
        .execute(&read_file_command(path, lines), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;
    format_result(&result)
}

/// Write (or append) `content` to `path`.
pub async fn write_file(
    executor: &CommandExecutor,
    path: &str,
    content: &str,
    append: bool,
) -> String {
    let result = executor
        .execute(
            &write_file_command(path, content, append),
            DEFAULT_COMMAND_TIMEOUT_SECS,
        )
        .await;

    if result.success {
        format!("Successfully wrote to {}", path)
    } else {
        format_result(&result)
    }
}

/// Check whether `path` exists, describing it with `file` when it does.
pub async fn file_exists(executor: &CommandExecutor, path: &str) -> FileExistsResponse {
    let result = executor
        .execute(&file_exists_command(path), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;

    if result.stdout().trim() != "exists" {
        return FileExistsResponse {
            exists: false,
            info: None,
        };
    }

    let type_result = executor
        .execute(&file_type_command(path), DEFAULT_COMMAND_TIMEOUT_SECS)
        .await;

    FileExistsResponse {
        exists: true,
        info: Some(type_result.stdout().trim().to_string()),
    }
}
