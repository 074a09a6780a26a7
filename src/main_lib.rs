// Library module containing testable functions behind the CLI

use crate::command::Command;
use crate::dump::{render_paths, render_tree};
use crate::engine::Lrud;
use crate::error::{LrudError, Result};
use crate::executor::Executor;
use crate::layout::Layout;
use crate::test_runner::{TestResult, TestRunner};
use std::fs;

/// Load a layout, apply one command and emit the resulting layout as JSON
pub fn execute_command(layout_path: &str, command_str: &str, output_path: Option<&str>) -> Result<String> {
    let layout = Layout::load_from_file(layout_path)?;
    let mut engine = layout.build_engine()?;

    let command = Command::from_string(command_str).map_err(LrudError::Generic)?;
    let result = Executor::execute(&mut engine, &command)?;
    if let Some(message) = &result.status_message {
        log::info!("execute: {}", message);
    }

    let result_json = Layout::from_engine(&engine).to_json()?;

    match output_path {
        Some(path) => {
            fs::write(path, &result_json)?;
            println!("Result saved to: {}", path);
        }
        None => {
            println!("{}", result_json);
        }
    }

    Ok(result_json)
}

/// Run a navigation script, optionally starting from a layout
pub fn run_script(script_path: &str, layout_path: Option<&str>, overwrite: bool) -> Result<TestResult> {
    let mut engine = match layout_path {
        Some(path) => Layout::load_from_file(path)?.build_engine()?,
        None => Lrud::new(),
    };

    let mut runner = TestRunner::from_file(script_path).map_err(|e| LrudError::Generic(e.to_string()))?;
    runner.overwrite_mode = overwrite;

    log::info!("🧪 Running test script with {} commands", runner.script.commands.len());
    runner
        .run(&mut engine)
        .map_err(|e| LrudError::Generic(e.to_string()))
}

/// Path list followed by the tree dump
pub fn inspect_layout(layout_path: &str) -> Result<String> {
    let engine = Layout::load_from_file(layout_path)?.build_engine()?;
    Ok(format!("{}\n{}", render_paths(&engine), render_tree(&engine)))
}
