//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::automaton::analyzer::analyze;
use crate::diagram::Diagram;
use crate::input::Instance;
use crate::{Config, Result};
use std::io::Write;
use std::path::Path;

/// Load an instance and run the layout pipeline
fn load_diagram(instance_path: &Path, config: &Config) -> Result<Diagram> {
    tracing::info!("Loading instance from {:?}", instance_path);
    let instance = Instance::from_file(instance_path)?;
    tracing::debug!(
        "Instance has {} node records, {} edge records",
        instance.nodes.len(),
        instance.edges.len()
    );
    Ok(Diagram::build(instance, config))
}

/// Render command implementation
pub mod render {
    use super::*;
    use crate::cli::{OutputFormat, output};

    /// Write the diagram in the requested format
    pub fn write_format(
        w: &mut impl Write,
        diagram: &Diagram,
        format: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        match format {
            OutputFormat::Svg => {
                let svg = crate::render::render_svg(diagram, &config.layout)?;
                w.write_all(svg.as_bytes())?;
            }
            OutputFormat::Dot => {
                w.write_all(crate::render::to_dot(diagram).as_bytes())?;
            }
            OutputFormat::Json => output::output_json(w, diagram)?,
            OutputFormat::Table => {
                let report = analyze(&diagram.automaton);
                output::output_table(w, diagram, &report)?;
            }
        }
        Ok(())
    }

    /// Execute the render command
    pub fn execute(
        instance_path: &Path,
        format: OutputFormat,
        output_path: Option<&Path>,
        config: &Config,
    ) -> Result<()> {
        let diagram = load_diagram(instance_path, config)?;

        match output_path {
            Some(path) => {
                let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
                write_format(&mut file, &diagram, format, config)?;
                file.flush()?;
                tracing::info!("Wrote {:?} output to {:?}", format, path);
            }
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                write_format(&mut lock, &diagram, format, config)?;
            }
        }

        Ok(())
    }
}

/// Inspect command implementation
pub mod inspect {
    use super::*;
    use crate::cli::output;

    /// Execute the inspect command
    pub fn execute(instance_path: &Path, config: &Config) -> Result<()> {
        let diagram = load_diagram(instance_path, config)?;
        let report = analyze(&diagram.automaton);

        let stdout = std::io::stdout();
        let mut w = stdout.lock();
        output::output_table(&mut w, &diagram, &report)?;

        writeln!(w, "Layers:")?;
        for layer in &diagram.layout.layers {
            writeln!(w, "  [{}] {}", layer.column, layer.nodes.join(", "))?;
        }
        if !diagram.trace.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "Trace: {} transitions over {} nodes",
                diagram.trace.transitions,
                diagram.trace.nodes.len()
            )?;
        }

        Ok(())
    }
}

/// Validate command implementation
pub mod validate {
    use super::*;
    use std::collections::HashSet;

    /// Problems found in an instance
    #[derive(Debug, Default)]
    pub struct ValidationReport {
        pub errors: Vec<String>,
        pub warnings: Vec<String>,
    }

    impl ValidationReport {
        pub fn is_valid(&self) -> bool {
            self.errors.is_empty()
        }
    }

    /// Check an instance for structural problems
    pub fn check(instance: &Instance) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut ids = HashSet::new();
        for node in &instance.nodes {
            if !ids.insert(node.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate node id '{}'", node.id));
            }
        }

        let starts = instance.nodes.iter().filter(|n| n.is_start).count();
        match starts {
            0 => report.errors.push("No start node".to_string()),
            1 => {}
            n => report
                .warnings
                .push(format!("{} start nodes, only the first is used", n)),
        }
        let accepting = instance.nodes.iter().filter(|n| n.is_accepting).count();
        match accepting {
            0 => report.warnings.push("No accepting node".to_string()),
            1 => {}
            n => report
                .warnings
                .push(format!("{} accepting nodes, only the first is pinned", n)),
        }

        let relations = instance.nodes.iter().flat_map(|node| {
            node.advance
                .iter()
                .chain(node.skip.iter())
                .map(move |target| (node.id.as_str(), target.as_str()))
        });
        let flat = instance
            .edges
            .iter()
            .map(|e| (e.source_id.as_str(), e.target_id.as_str()));
        for (source, target) in relations.chain(flat) {
            for endpoint in [source, target] {
                if !ids.contains(endpoint) {
                    report.errors.push(format!(
                        "Edge {} -> {} references unknown node '{}'",
                        source, target, endpoint
                    ));
                }
            }
        }

        if let Some(trace) = &instance.trace {
            let states: HashSet<&str> = trace
                .states
                .iter()
                .filter(|s| s.node.as_deref().is_some_and(|n| ids.contains(n)))
                .map(|s| s.id.as_str())
                .collect();
            // Rejected steps never reach the diagram
            for (i, step) in trace
                .steps
                .iter()
                .enumerate()
                .filter(|(_, step)| step.accepted != Some(false))
            {
                for state in [&step.state_before, &step.state_after] {
                    if !states.contains(state.as_str()) {
                        report.errors.push(format!(
                            "Trace step {} references unresolvable state '{}'",
                            i, state
                        ));
                    }
                }
            }
        }

        let mut indices = HashSet::new();
        for cell in &instance.tape {
            if !indices.insert(cell.index) {
                report
                    .warnings
                    .push(format!("Duplicate tape index {}", cell.index));
            }
        }

        report
    }

    /// Execute the validate command
    pub fn execute(instance_path: &Path) -> Result<()> {
        tracing::info!("Validating instance: {:?}", instance_path);

        let instance = match Instance::from_file(instance_path) {
            Ok(i) => i,
            Err(e) => {
                eprintln!("❌ Failed to load instance: {}", e);
                return Err(e);
            }
        };

        let report = check(&instance);

        println!("📋 Instance Validation Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("File: {:?}", instance_path);
        println!();
        println!("Automaton:");
        println!("  Nodes: {}", instance.nodes.len());
        println!("  Flat edges: {}", instance.edges.len());
        match &instance.trace {
            Some(trace) => println!(
                "  Trace: {} steps, {} states",
                trace.steps.len(),
                trace.states.len()
            ),
            None => println!("  Trace: none"),
        }
        println!("  Tape: {} cells", instance.tape.len());
        println!();

        if !report.errors.is_empty() {
            println!("❌ Errors:");
            for error in &report.errors {
                println!("   {}", error);
            }
            println!();
        }

        if !report.warnings.is_empty() {
            println!("⚠️  Warnings:");
            for warning in &report.warnings {
                println!("   {}", warning);
            }
            println!();
        }

        if report.is_valid() {
            println!("✅ Instance is valid!");
            Ok(())
        } else {
            println!(
                "❌ Instance validation failed with {} error(s)",
                report.errors.len()
            );
            Err(crate::Error::Validation(report.errors.len()))
        }
    }
}
