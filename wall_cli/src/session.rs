//! Line-oriented wall building session.
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so the whole
//! session can be driven from a script in tests.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use serde::Serialize;
use wall_core::heat_transfer::BoundaryInput;
use wall_core::{
    Assembly, BoundaryConditions, HeatTransferResult, Layer, MaterialTable, WallError, WallResult,
};

const HELP: &str = "\
Commands:
  series <R | #n | material name>   add a full-area layer
  parallel <paths>                  add a layer split into area paths
                                    ('cancel' at any path prompt abandons it)
  remove <n>                        delete layer n (asks first)
  undo                              delete the most recent layer
  list                              show layers
  bounds                            re-enter temperatures, films and area
  materials                         show the material table
  calc                              show results
  help                              show this text
  quit                              leave";

/// One R-value source as typed at a prompt
#[derive(Debug, PartialEq)]
struct SourceInput {
    r_value: Option<f64>,
    material_key: Option<String>,
}

/// Interpret prompt text as a typed R-value, a `#n` material number, or a
/// material name.
fn parse_source(text: &str, materials: &MaterialTable) -> WallResult<SourceInput> {
    let text = text.trim();
    if let Some(number) = text.strip_prefix('#') {
        let material = number
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| materials.by_position(i))
            .ok_or_else(|| WallError::unknown_material(text))?;
        return Ok(SourceInput {
            r_value: None,
            material_key: Some(material.name.clone()),
        });
    }
    if let Ok(r_value) = text.parse::<f64>() {
        return Ok(SourceInput {
            r_value: Some(r_value),
            material_key: None,
        });
    }
    Ok(SourceInput {
        r_value: None,
        material_key: (!text.is_empty()).then(|| text.to_string()),
    })
}

/// Typed at a parallel wizard prompt to drop the layer being built
fn is_abandon(text: &str) -> bool {
    matches!(text, "cancel" | "quit")
}

#[derive(Serialize)]
struct Snapshot<'a> {
    layers: &'a [Layer],
    bounds: &'a BoundaryConditions,
    result: Option<HeatTransferResult>,
}

pub struct Session<R, W> {
    wall: Assembly,
    bounds: BoundaryConditions,
    json: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        materials: Arc<MaterialTable>,
        bounds: BoundaryConditions,
        json: bool,
        input: R,
        output: W,
    ) -> Self {
        Session {
            wall: Assembly::new("Wall", materials),
            bounds,
            json,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Composite Wall Heat Transfer")?;
        writeln!(self.output, "============================")?;
        writeln!(self.output, "{HELP}")?;
        self.show_results()?;

        while let Some(line) = self.prompt("> ")? {
            let (command, arg) = match line.split_once(char::is_whitespace) {
                Some((command, arg)) => (command, arg.trim()),
                None => (line.as_str(), ""),
            };
            match command {
                "" => {}
                "series" => self.add_series(arg)?,
                "parallel" => self.add_parallel(arg)?,
                "remove" => self.remove(arg)?,
                "undo" => match self.wall.remove_last_layer() {
                    Ok(_) => self.show_results()?,
                    Err(e) => self.report(&e)?,
                },
                "list" => self.list()?,
                "bounds" => self.edit_bounds()?,
                "materials" => self.list_materials()?,
                "calc" => self.show_results()?,
                "help" => writeln!(self.output, "{HELP}")?,
                "quit" | "exit" => break,
                other => writeln!(self.output, "Unknown command '{other}'. Type 'help'.")?,
            }
        }
        Ok(())
    }

    /// Print `text`, read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, error: &WallError) -> io::Result<()> {
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(error) {
                return writeln!(self.output, "{json}");
            }
        }
        let prefix = if error.is_input_error() { "Input Error" } else { "Error" };
        writeln!(self.output, "{prefix}: {error}")
    }

    fn add_series(&mut self, arg: &str) -> io::Result<()> {
        let added = parse_source(arg, self.wall.materials()).and_then(|source| {
            self.wall
                .add_series_layer(source.r_value, source.material_key.as_deref())
        });
        match added {
            Ok(_) => self.show_results(),
            Err(e) => self.report(&e),
        }
    }

    fn add_parallel(&mut self, arg: &str) -> io::Result<()> {
        let path_count = match arg.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                let error = WallError::parse("path_count", arg);
                return self.report(&error);
            }
        };
        let mut builder = match self.wall.begin_parallel_layer(path_count) {
            Ok(builder) => builder,
            Err(e) => return self.report(&e),
        };

        while !builder.is_complete() {
            writeln!(
                self.output,
                "Path {}/{}: area used so far {:.2}%, area left {:.2}%",
                builder.next_path_number(),
                builder.path_count(),
                builder.area_used(),
                builder.remaining_area()
            )?;
            let source_text = match self.prompt("  R-value or #material: ")? {
                Some(text) if !is_abandon(&text) => text,
                _ => return writeln!(self.output, "Parallel layer abandoned."),
            };
            let area_prompt = if builder.is_next_last() {
                format!("  Area % [{:.2}]: ", builder.remaining_area())
            } else {
                "  Area %: ".to_string()
            };
            let area_text = match self.prompt(&area_prompt)? {
                Some(text) if !is_abandon(&text) => text,
                _ => return writeln!(self.output, "Parallel layer abandoned."),
            };

            let accepted = parse_source(&source_text, self.wall.materials()).and_then(|source| {
                let area = if area_text.is_empty() && builder.is_next_last() {
                    builder.remaining_area()
                } else {
                    wall_core::validation::parse_number("area_percent", &area_text)?
                };
                builder.add_path(source.r_value, source.material_key.as_deref(), area)
            });
            if let Err(e) = accepted {
                self.report(&e)?;
            }
        }

        match builder.commit(&mut self.wall) {
            Ok(_) => self.show_results(),
            Err(e) => self.report(&e),
        }
    }

    fn remove(&mut self, arg: &str) -> io::Result<()> {
        let index = match arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) => index,
            None => return self.report(&WallError::parse("layer", arg)),
        };
        if index >= self.wall.len() {
            let missing = WallError::NotFound {
                index,
                len: self.wall.len(),
            };
            return self.report(&missing);
        }
        let answer = self.prompt(&format!("Are you sure you want to delete layer {}? [y/N] ", index + 1))?;
        if !matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")) {
            return Ok(());
        }
        match self.wall.remove_layer(index) {
            Ok(_) => self.show_results(),
            Err(e) => self.report(&e),
        }
    }

    fn list(&mut self) -> io::Result<()> {
        if self.json {
            let snapshot = Snapshot {
                layers: self.wall.layers(),
                bounds: &self.bounds,
                result: self.wall.recompute(&self.bounds).ok(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&snapshot) {
                return writeln!(self.output, "{json}");
            }
        }
        if self.wall.is_empty() {
            return writeln!(self.output, "No layers.");
        }
        let lines: Vec<String> = self
            .wall
            .layers()
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| {
                layer
                    .describe()
                    .into_iter()
                    .map(move |text| format!("{:>3}. {}", i + 1, text))
            })
            .collect();
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn list_materials(&mut self) -> io::Result<()> {
        let lines: Vec<String> = self
            .wall
            .materials()
            .iter()
            .enumerate()
            .map(|(i, material)| format!("{:>3}. {}", i + 1, material.display_name()))
            .collect();
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Prompt for all five boundary fields; blank keeps the current value.
    fn edit_bounds(&mut self) -> io::Result<()> {
        let current = BoundaryInput::from(&self.bounds);
        let mut raw = current.clone();
        let fields: [(&str, &str, &mut String); 5] = [
            ("Inside Temp (°F)", current.t_inside.as_str(), &mut raw.t_inside),
            ("Outside Temp (°F)", current.t_outside.as_str(), &mut raw.t_outside),
            ("Inside Air Film R-value", current.film_inside.as_str(), &mut raw.film_inside),
            ("Outside Air Film R-value", current.film_outside.as_str(), &mut raw.film_outside),
            ("Wall Area (ft²)", current.area.as_str(), &mut raw.area),
        ];
        for (label, shown, slot) in fields {
            match self.prompt(&format!("  {label} [{shown}]: "))? {
                Some(text) if !text.is_empty() => *slot = text,
                Some(_) => {}
                None => return Ok(()),
            }
        }
        match BoundaryConditions::parse(&raw) {
            Ok(bounds) => {
                self.bounds = bounds;
                self.show_results()
            }
            Err(e) => self.report(&e),
        }
    }

    fn show_results(&mut self) -> io::Result<()> {
        match self.wall.recompute(&self.bounds) {
            Ok(result) if self.json => match serde_json::to_string_pretty(&result) {
                Ok(json) => writeln!(self.output, "{json}"),
                Err(_) => writeln!(self.output, "{}", result.summary()),
            },
            Ok(result) => writeln!(self.output, "{}", result.summary()),
            Err(e) => self.report(&e),
        }
    }
}
