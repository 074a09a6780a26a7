use crate::command::Command;
use crate::direction::Direction;
use crate::dump::render_tree;
use crate::engine::Lrud;
use crate::executor::Executor;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Script format for headless navigation tests
///
/// Format is a simple text file where each line represents a command:
/// - `layout:<file>` - Replace the engine with one built from a layout file
/// - `key:<direction>` - Send a direction (e.g., `key:right`, `key:UP`)
/// - `do:<command>` - Run any engine command (e.g., `do:focus:NODE_1`, `do:unregister:BOX_A`)
/// - `assert:<property>:<value>` - Assert engine state
/// - `dump:<file>` - Compare the tree dump against a file (or write it in overwrite mode)
/// - `# comment` - Comments (ignored)
///
/// Assertion properties: `focused`, `active_child` (`parent=child`),
/// `exists` (`id=true|false`), `path_count`, `root`.
///
/// Examples:
/// ```text
/// layout:grid.json
/// do:focus:NODE_1
/// key:right
/// assert:focused:NODE_2
/// assert:active_child:root=BOX_A
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCommand {
    pub command_type: CommandType,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommandType {
    Layout,
    Key,
    Do,
    Assert,
    Dump,
}

#[derive(Debug, Clone)]
pub struct TestScript {
    pub commands: Vec<TestCommand>,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    pub script: TestScript,
    pub current_command: usize,
    pub overwrite_mode: bool,
    /// Directory that relative `layout:` and `dump:` paths resolve against
    pub base_dir: Option<PathBuf>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    pub fn new() -> Self {
        TestRunner {
            script: TestScript {
                commands: Vec::new(),
            },
            current_command: 0,
            overwrite_mode: false,
            base_dir: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut runner = Self::from_string(&content)?;
        runner.base_dir = path.parent().map(Path::to_path_buf);
        Ok(runner)
    }

    pub fn from_string(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut commands = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                return Err(format!("Invalid command on line {}: {}", line_num + 1, line).into());
            };
            let command_type = match directive {
                "layout" => CommandType::Layout,
                "key" => CommandType::Key,
                "do" => CommandType::Do,
                "assert" => CommandType::Assert,
                "dump" => CommandType::Dump,
                _ => {
                    return Err(
                        format!("Invalid command on line {}: {}", line_num + 1, line).into(),
                    )
                }
            };

            commands.push(TestCommand {
                command_type,
                value: value.trim().to_string(),
                line: line_num + 1,
            });
        }

        Ok(TestRunner {
            script: TestScript { commands },
            ..TestRunner::new()
        })
    }

    fn resolve(&self, file: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(file),
            None => PathBuf::from(file),
        }
    }

    /// Run the script against `engine`, collecting failures instead of stopping
    pub fn run(&mut self, engine: &mut Lrud) -> Result<TestResult, Box<dyn std::error::Error>> {
        let start_time = Instant::now();
        let mut events_processed = 0;
        let mut assertions_passed = 0;
        let mut assertions_failed = 0;
        let mut errors = Vec::new();

        log::info!(
            "🧪 Starting test run with {} commands",
            self.script.commands.len()
        );

        for (index, command) in self.script.commands.iter().enumerate() {
            self.current_command = index;
            log::debug!("🧪 Executing command {}: {:?}", index, command);

            match &command.command_type {
                CommandType::Layout => {
                    let path = self.resolve(&command.value);
                    let layout = Layout::load_from_file(&path.to_string_lossy())?;
                    *engine = layout.build_engine()?;
                }
                CommandType::Key => {
                    let direction: Direction = command.value.parse()?;
                    match Executor::execute(engine, &Command::Move(direction)) {
                        Ok(_) => events_processed += 1,
                        Err(e) => errors.push(format!("line {}: key event failed: {}", command.line, e)),
                    }
                }
                CommandType::Do => {
                    let parsed = Command::from_string(&command.value)?;
                    match Executor::execute(engine, &parsed) {
                        Ok(_) => events_processed += 1,
                        Err(e) => errors.push(format!("line {}: command failed: {}", command.line, e)),
                    }
                }
                CommandType::Assert => match self.evaluate_assertion(engine, &command.value) {
                    Ok(true) => {
                        assertions_passed += 1;
                        log::debug!("🧪 Assertion passed: {}", command.value);
                    }
                    Ok(false) => {
                        assertions_failed += 1;
                        errors.push(format!(
                            "line {}: assertion failed: {}",
                            command.line, command.value
                        ));
                    }
                    Err(e) => {
                        assertions_failed += 1;
                        errors.push(format!("line {}: assertion error: {}", command.line, e));
                    }
                },
                CommandType::Dump => {
                    if let Err(e) = self.check_dump(engine, &command.value) {
                        errors.push(format!("line {}: {}", command.line, e));
                    }
                }
            }
        }

        let duration = start_time.elapsed();
        log::info!("🧪 Test run completed in {:?}", duration);

        let success = assertions_failed == 0 && errors.is_empty();
        Ok(TestResult {
            duration,
            events_processed,
            assertions_passed,
            assertions_failed,
            errors,
            success,
        })
    }

    pub fn evaluate_assertion(
        &self,
        engine: &Lrud,
        assertion: &str,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let Some((property, expected)) = assertion.split_once(':') else {
            return Err("Assertion must be in format 'property:value'".into());
        };

        match property {
            "focused" => match engine.current_focus() {
                Some(id) => Ok(id == expected),
                None => Ok(expected == "none" || expected.is_empty()),
            },
            "active_child" => {
                let (parent, child) = expected
                    .split_once('=')
                    .ok_or("active_child expects 'parent=child'")?;
                let node = engine
                    .get_node(parent)
                    .ok_or_else(|| format!("active_child: '{}' is not registered", parent))?;
                match node.active_child {
                    Some(active) => Ok(active == child),
                    None => Ok(child == "none" || child.is_empty()),
                }
            }
            "exists" => {
                let (id, flag) = expected.split_once('=').ok_or("exists expects 'id=bool'")?;
                let expected_bool = flag
                    .parse::<bool>()
                    .map_err(|_| "exists expects boolean value")?;
                Ok(engine.get_node(id).is_some() == expected_bool)
            }
            "path_count" => {
                let expected_count = expected
                    .parse::<usize>()
                    .map_err(|_| "path_count expects numeric value")?;
                Ok(engine.get_node_path_list().len() == expected_count)
            }
            "root" => Ok(engine.root_node_id().unwrap_or("none") == expected),
            _ => Err(format!("Unknown assertion property: {}", property).into()),
        }
    }

    fn check_dump(&self, engine: &Lrud, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = render_tree(engine);
        let final_path = self.resolve(filename);
        let final_filename = final_path.to_string_lossy();

        if self.overwrite_mode {
            std::fs::write(&final_path, content)?;
            log::info!("🧪 Dump saved to: {}", final_filename);
            return Ok(());
        }

        match std::fs::read_to_string(&final_path) {
            Ok(existing_content) if existing_content == content => {
                log::debug!("🧪 Dump verification passed: {}", final_filename);
                Ok(())
            }
            Ok(_) => Err(format!(
                "dump verification failed: {} differs from the current tree. Use --overwrite to update.",
                final_filename
            )
            .into()),
            Err(_) => Err(format!(
                "dump verification failed: {} does not exist. Use --overwrite to create.",
                final_filename
            )
            .into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestResult {
    pub duration: Duration,
    pub events_processed: usize,
    pub assertions_passed: usize,
    pub assertions_failed: usize,
    pub errors: Vec<String>,
    pub success: bool,
}

impl TestResult {
    pub fn print_summary(&self) {
        println!("🧪 Test Results:");
        println!("   Duration: {:?}", self.duration);
        println!("   Events processed: {}", self.events_processed);
        println!("   Assertions passed: {}", self.assertions_passed);
        println!("   Assertions failed: {}", self.assertions_failed);

        if !self.errors.is_empty() {
            println!("   Errors:");
            for error in &self.errors {
                println!("     - {}", error);
            }
        }

        if self.success {
            println!("   Status: ✅ PASSED");
        } else {
            println!("   Status: ❌ FAILED");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeAttrs;

    fn engine() -> Lrud {
        let mut nav = Lrud::new();
        nav.register_node("root", NodeAttrs::new().horizontal().wrapping())
            .unwrap();
        for id in ["NODE_1", "NODE_2", "NODE_3"] {
            nav.register_node(id, NodeAttrs::new().focusable()).unwrap();
        }
        nav
    }

    #[test]
    fn test_parse_simple_script() {
        let content = r#"
# Test script
do:focus:NODE_1
key:right
assert:focused:NODE_2
dump:after.txt
"#;

        let runner = TestRunner::from_string(content).unwrap();
        assert_eq!(runner.script.commands.len(), 4);

        assert!(matches!(runner.script.commands[0].command_type, CommandType::Do));
        assert_eq!(runner.script.commands[0].value, "focus:NODE_1");

        assert!(matches!(runner.script.commands[1].command_type, CommandType::Key));
        assert_eq!(runner.script.commands[1].value, "right");

        assert!(matches!(runner.script.commands[2].command_type, CommandType::Assert));
        assert_eq!(runner.script.commands[2].value, "focused:NODE_2");
        assert_eq!(runner.script.commands[2].line, 5);

        assert!(matches!(runner.script.commands[3].command_type, CommandType::Dump));
    }

    #[test]
    fn test_parse_rejects_unknown_lines() {
        assert!(TestRunner::from_string("jump").is_err());
        assert!(TestRunner::from_string("teleport:NODE_1").is_err());
    }

    #[test]
    fn test_run_collects_results() {
        let script = r#"
do:focus:NODE_3
key:right
assert:focused:NODE_1
assert:active_child:root=NODE_1
assert:exists:NODE_2=true
do:unregister:NODE_2
assert:exists:NODE_2=false
assert:path_count:3
assert:focused:NODE_2
"#;
        let mut runner = TestRunner::from_string(script).unwrap();
        let mut nav = engine();
        let result = runner.run(&mut nav).unwrap();

        assert_eq!(result.events_processed, 3);
        assert_eq!(result.assertions_passed, 5);
        assert_eq!(result.assertions_failed, 1);
        assert!(!result.success);
    }

    #[test]
    fn test_failed_command_is_reported() {
        let mut runner = TestRunner::from_string("do:focus:root").unwrap();
        let mut nav = engine();
        let result = runner.run(&mut nav).unwrap();
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("non focusable"));
    }

    #[test]
    fn test_assertion_evaluation() {
        let mut nav = engine();
        nav.assign_focus("NODE_2").unwrap();
        let runner = TestRunner::new();

        assert!(runner.evaluate_assertion(&nav, "focused:NODE_2").unwrap());
        assert!(!runner.evaluate_assertion(&nav, "focused:NODE_1").unwrap());
        assert!(runner.evaluate_assertion(&nav, "root:root").unwrap());
        assert!(runner.evaluate_assertion(&nav, "path_count:4").unwrap());
        assert!(runner.evaluate_assertion(&nav, "path_count:four").is_err());
        assert!(runner.evaluate_assertion(&nav, "colour:blue").is_err());
        assert!(runner.evaluate_assertion(&nav, "focused").is_err());
    }

    #[test]
    fn test_dump_overwrite_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let mut nav = engine();
        nav.assign_focus("NODE_1").unwrap();

        let mut writer = TestRunner::from_string("dump:tree.txt").unwrap();
        writer.base_dir = Some(dir.path().to_path_buf());
        writer.overwrite_mode = true;
        assert!(writer.run(&mut nav).unwrap().success);

        let mut verifier = TestRunner::from_string("dump:tree.txt").unwrap();
        verifier.base_dir = Some(dir.path().to_path_buf());
        assert!(verifier.run(&mut nav).unwrap().success);

        nav.handle_key_event(Direction::Right).unwrap();
        let result = verifier.run(&mut nav).unwrap();
        assert!(!result.success);
    }
}
