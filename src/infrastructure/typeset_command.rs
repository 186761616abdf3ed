//! 外部排版程序 - 基础设施层
//!
//! 持有排版程序的启动参数，只暴露"排版一段 TeX"的能力

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

use crate::markup::{TypesetEngine, TypesetError, TypesetOptions};

/// 基于命令行的排版引擎
///
/// 约定与 KaTeX CLI 一致：TeX 从标准输入读入，标记从标准输出返回，
/// `--display-mode` 切换块级公式，`--no-throw-on-error` 抑制解析错误。
///
/// 每次调用都会阻塞到进程退出。
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// 创建新的排版引擎
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// 附加固定参数
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 在 PATH 中查找可执行程序，不缓存结果
    fn resolve(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }
}

impl TypesetEngine for CommandEngine {
    fn is_available(&self) -> bool {
        self.resolve().is_some()
    }

    fn render(&self, tex: &str, opts: &TypesetOptions) -> Result<String, TypesetError> {
        let program = self.resolve().ok_or(TypesetError::Unavailable)?;

        let mut command = Command::new(&program);
        command.args(&self.args);
        if opts.display_mode {
            command.arg("--display-mode");
        }
        if !opts.throw_on_error {
            command.arg("--no-throw-on-error");
        }

        debug!("调用排版程序 {} (TeX 长度: {})", program.display(), tex.len());

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TypesetError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // 写入放在单独线程，读取输出的同时喂入 TeX，子进程无论如何都会被回收
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(tex.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("写入线程异常退出")));
            (output, written)
        });

        let output = output?;
        if !output.status.success() {
            return Err(TypesetError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // 程序没读完输入就正常退出时，以它的输出为准
        match written {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }

        let markup = String::from_utf8(output.stdout)?;
        Ok(markup.trim_end().to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_missing_program_unavailable() {
        let engine = CommandEngine::new("definitely-not-a-typesetter-9f3a");
        assert!(!engine.is_available());
        assert!(matches!(
            engine.render("x", &TypesetOptions::inline()),
            Err(TypesetError::Unavailable)
        ));
    }

    #[test]
    fn test_cat_echoes_input() {
        // cat 会把多余参数当作文件名，这里用 sh 忽略参数后回显
        let engine = CommandEngine::new("sh").with_args(["-c", "cat", "typeset"]);
        if !engine.is_available() {
            return;
        }
        let markup = engine.render(r"\frac{1}{2}", &TypesetOptions::inline()).unwrap();
        assert_eq!(markup, r"\frac{1}{2}");
    }

    #[test]
    fn test_non_zero_exit_is_error() {
        let engine = CommandEngine::new("sh").with_args(["-c", "cat >/dev/null; echo oops >&2; exit 3", "typeset"]);
        if !engine.is_available() {
            return;
        }
        match engine.render("x", &TypesetOptions::inline()) {
            Err(TypesetError::Exit { stderr, .. }) => assert_eq!(stderr, "oops"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_executable_file_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("katex");
        fs::write(&script, "#!/bin/sh\ncat\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();

        let engine = CommandEngine::new(script.to_string_lossy());
        assert!(!engine.is_available());

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(engine.is_available());
    }

    #[test]
    fn test_program_ignoring_large_input_returns() {
        let engine = CommandEngine::new("sh").with_args(["-c", "exit 0", "typeset"]);
        if !engine.is_available() {
            return;
        }
        let tex = "x".repeat(1 << 20);
        let markup = engine.render(&tex, &TypesetOptions::inline()).unwrap();
        assert_eq!(markup, "");
    }

    #[test]
    fn test_large_output_does_not_block() {
        let engine = CommandEngine::new("sh").with_args(["-c", "cat", "typeset"]);
        if !engine.is_available() {
            return;
        }
        let tex = "y".repeat(1 << 20);
        let markup = engine.render(&tex, &TypesetOptions::inline()).unwrap();
        assert_eq!(markup.len(), tex.len());
    }
}
