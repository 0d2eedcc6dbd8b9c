#![deny(unsafe_code)]
//! CLI binary for the tonekit palette engine.
//!
//! Subcommands:
//! - `generate`: derive a palette from hue, chroma and theme
//! - `convert <COLOR>`: show a color in other display formats
//! - `pick <HEX>`: slider values for a picked color
//! - `gradient hue|chroma`: slider background gradients
//! - `project ...`: manage named projects of saved palettes

mod error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tonekit_core::convert::{convert, parse_color};
use tonekit_core::{
    ColorConfig, ColorFormat, ColorPalette, CssVariables, SavedPalette, Studio, StudioError,
};
use tonekit_projects::ProjectStore;

#[derive(Parser)]
#[command(name = "tonekit", about = "OKLCH color palette engine")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Palette generation input, from flags and/or a JSON config.
#[derive(Args)]
struct ConfigArgs {
    /// Base hue in degrees [0, 360).
    #[arg(long, allow_hyphen_values = true)]
    hue: Option<f64>,

    /// Base chroma [0, 0.4].
    #[arg(long, allow_hyphen_values = true)]
    chroma: Option<f64>,

    /// Generate the light theme.
    #[arg(long)]
    light: bool,

    /// Config as JSON, e.g. '{"hue": 200, "chroma": 0.12, "isLight": true}'.
    /// Individual flags override its fields.
    #[arg(long)]
    config: Option<String>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<ColorConfig, CliError> {
        let mut config = match &self.config {
            Some(json) => {
                let value: serde_json::Value = serde_json::from_str(json)
                    .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
                ColorConfig::from_json(&value)
            }
            None => ColorConfig::default(),
        };
        if let Some(hue) = self.hue {
            config.hue = hue;
        }
        if let Some(chroma) = self.chroma {
            config.chroma = chroma;
        }
        config.is_light |= self.light;

        let clamped = config.clamped();
        if clamped != config {
            log::warn!(
                "config out of range, using hue {} and chroma {}",
                clamped.hue,
                clamped.chroma
            );
        }
        Ok(clamped)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GradientKind {
    Hue,
    Chroma,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a palette.
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Display format (oklch, hex, rgba, hsl).
        #[arg(short, long, default_value = "oklch")]
        format: String,

        /// Print CSS custom properties instead of the palette.
        #[arg(long)]
        css: bool,
    },
    /// Convert one color (oklch() string or hex) to other formats.
    Convert {
        color: String,

        /// Target format; all formats when omitted.
        #[arg(long)]
        to: Option<String>,
    },
    /// Derive slider values from a picked hex color.
    Pick {
        hex: String,

        /// Generate the light theme.
        #[arg(long)]
        light: bool,
    },
    /// Build a slider background gradient.
    Gradient {
        kind: GradientKind,

        /// Fixed hue for the chroma gradient.
        #[arg(long, allow_hyphen_values = true, default_value_t = tonekit_core::config::DEFAULT_HUE)]
        hue: f64,

        /// Fixed chroma for the hue gradient.
        #[arg(long, allow_hyphen_values = true, default_value_t = tonekit_core::config::DEFAULT_CHROMA)]
        chroma: f64,

        /// Lightness of every stop [0, 1].
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.7)]
        lightness: f64,
    },
    /// Manage projects of saved palettes.
    Project {
        /// Project store file.
        #[arg(long, env = "TONEKIT_STORE", default_value = "tonekit-projects.json")]
        store: PathBuf,

        #[command(subcommand)]
        command: ProjectCommand,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// List projects.
    List,
    /// Create an empty project.
    Create { name: String },
    /// Rename a project.
    Rename { from: String, to: String },
    /// Delete a project and its palettes.
    Delete { name: String },
    /// Show the palettes of a project.
    Show { name: String },
    /// Generate a palette and save it into a project.
    Save {
        project: String,
        name: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Remove a palette from a project.
    Remove { project: String, name: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_palette(palette: &ColorPalette, format: ColorFormat) -> Vec<(&'static str, String)> {
    palette
        .iter()
        .map(|(key, value)| (key.as_str(), convert(value, format)))
        .collect()
}

fn run_generate(
    json: bool,
    config: &ConfigArgs,
    format: &str,
    css: bool,
) -> Result<(), CliError> {
    let config = config.resolve()?;
    let format: ColorFormat = format.parse()?;
    let mut studio = Studio::new();
    let palette = studio.generate_palette(&config);

    if css {
        let vars = CssVariables::from_palette(&palette);
        if json {
            let map: serde_json::Map<String, serde_json::Value> = vars
                .iter()
                .map(|(name, value)| (format!("--{name}"), value.into()))
                .collect();
            print_json(&serde_json::Value::Object(map))?;
        } else {
            print!("{}", vars.to_stylesheet(":root"));
        }
        return Ok(());
    }

    let colors = format_palette(&palette, format);
    if json {
        let map: serde_json::Map<String, serde_json::Value> = colors
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect();
        print_json(&serde_json::json!({ "config": config, "colors": map }))?;
    } else {
        for (name, value) in colors {
            println!("{name:<13}{value}");
        }
    }
    Ok(())
}

fn run_convert(json: bool, color: &str, to: Option<&str>) -> Result<(), CliError> {
    if parse_color(color).is_none() {
        return Err(StudioError::InvalidColor(color.to_string()).into());
    }
    let formats = match to {
        Some(name) => vec![name.parse::<ColorFormat>()?],
        None => ColorFormat::ALL.to_vec(),
    };
    if json {
        let map: serde_json::Map<String, serde_json::Value> = formats
            .iter()
            .map(|f| (f.name().to_string(), convert(color, *f).into()))
            .collect();
        print_json(&serde_json::Value::Object(map))?;
    } else if let [format] = formats.as_slice() {
        println!("{}", convert(color, *format));
    } else {
        for format in formats {
            println!("{:<6}{}", format.name(), convert(color, format));
        }
    }
    Ok(())
}

fn run_pick(json: bool, hex: &str, light: bool) -> Result<(), CliError> {
    let config = ColorConfig::from_hex(hex, light)
        .ok_or_else(|| StudioError::InvalidColor(hex.to_string()))?;
    if json {
        print_json(&serde_json::to_value(config)?)?;
    } else {
        println!("hue     {}", config.hue);
        println!("chroma  {}", config.chroma);
        println!("theme   {}", if config.is_light { "light" } else { "dark" });
    }
    Ok(())
}

fn run_gradient(
    json: bool,
    kind: GradientKind,
    hue: f64,
    chroma: f64,
    lightness: f64,
) -> Result<(), CliError> {
    let mut studio = Studio::new();
    let gradient = match kind {
        GradientKind::Hue => studio.hue_gradient(chroma, lightness),
        GradientKind::Chroma => studio.chroma_gradient(hue, lightness),
    };
    if json {
        print_json(&serde_json::json!({ "gradient": gradient }))?;
    } else {
        println!("{gradient}");
    }
    Ok(())
}

fn run_project(json: bool, store: PathBuf, command: ProjectCommand) -> Result<(), CliError> {
    let mut store = ProjectStore::open(store)?;
    match command {
        ProjectCommand::List => {
            let projects = store.list_projects();
            if json {
                let list: Vec<_> = projects
                    .iter()
                    .map(|p| serde_json::json!({ "name": p.name, "palettes": p.palettes.len() }))
                    .collect();
                print_json(&serde_json::Value::Array(list))?;
            } else if projects.is_empty() {
                eprintln!("no projects in {}", store.path().display());
            } else {
                for project in projects {
                    println!("{} ({} palettes)", project.name, project.palettes.len());
                }
            }
            return Ok(());
        }
        ProjectCommand::Show { name } => {
            let project = store
                .project(&name)
                .ok_or(StudioError::UnknownProject(name))?;
            if json {
                print_json(&serde_json::to_value(project)?)?;
            } else {
                println!("{}", project.name);
                for saved in &project.palettes {
                    println!(
                        "  {} (hue {}, chroma {}, {})",
                        saved.name,
                        saved.config.hue,
                        saved.config.chroma,
                        if saved.config.is_light { "light" } else { "dark" }
                    );
                }
            }
            return Ok(());
        }
        ProjectCommand::Create { name } => {
            let created = store.create_project(&name)?.name.clone();
            eprintln!("created project {created}");
        }
        ProjectCommand::Rename { from, to } => {
            store.rename_project(&from, &to)?;
            eprintln!("renamed project {from} -> {}", to.trim());
        }
        ProjectCommand::Delete { name } => {
            let deleted = store.delete_project(&name)?;
            eprintln!(
                "deleted project {} ({} palettes)",
                deleted.name,
                deleted.palettes.len()
            );
        }
        ProjectCommand::Save {
            project,
            name,
            config,
        } => {
            let config = config.resolve()?;
            let palette = Studio::new().generate_palette(&config);
            let replaced = store.save_palette(&project, SavedPalette::new(&name, config, &palette))?;
            let verb = if replaced { "replaced" } else { "saved" };
            eprintln!("{verb} palette {name} in {project}");
        }
        ProjectCommand::Remove { project, name } => {
            store.remove_palette(&project, &name)?;
            eprintln!("removed palette {name} from {project}");
        }
    }
    store.save()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Command::Generate {
            config,
            format,
            css,
        } => run_generate(json, &config, &format, css),
        Command::Convert { color, to } => run_convert(json, &color, to.as_deref()),
        Command::Pick { hex, light } => run_pick(json, &hex, light),
        Command::Gradient {
            kind,
            hue,
            chroma,
            lightness,
        } => run_gradient(json, kind, hue, chroma, lightness),
        Command::Project { store, command } => run_project(json, store, command),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tonekit").chain(args.iter().copied())).unwrap()
    }

    fn config_args(args: &[&str]) -> ConfigArgs {
        let mut full = vec!["generate"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Generate { config, .. } => config,
            _ => unreachable!(),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_defaults_when_no_flags() {
        let config = config_args(&[]).resolve().ok().unwrap();
        assert_eq!(config, ColorConfig::default());
    }

    #[test]
    fn flags_override_json_config() {
        let args = config_args(&[
            "--config",
            r#"{"hue": 10, "chroma": 0.2, "isLight": false}"#,
            "--hue",
            "-20",
            "--light",
        ]);
        let config = args.resolve().ok().unwrap();
        assert_eq!(config.hue, 340.0);
        assert_eq!(config.chroma, 0.2);
        assert!(config.is_light);
    }

    #[test]
    fn negative_numbers_are_accepted_by_every_numeric_flag() {
        let config = config_args(&["--hue", "-20", "--chroma", "-0.1"]).resolve().ok().unwrap();
        assert_eq!(config.hue, 340.0);
        assert_eq!(config.chroma, 0.0);

        let cli = parse(&["gradient", "chroma", "--hue", "-20", "--chroma", "-0.1", "--lightness", "-1"]);
        match cli.command {
            Command::Gradient {
                hue,
                chroma,
                lightness,
                ..
            } => {
                assert_eq!(hue, -20.0);
                assert_eq!(chroma, -0.1);
                assert_eq!(lightness, -1.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn bad_json_config_is_an_input_error() {
        let err = config_args(&["--config", "{nope"]).resolve().err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn out_of_range_chroma_is_clamped() {
        let config = config_args(&["--chroma", "0.9"]).resolve().ok().unwrap();
        assert_eq!(config.chroma, 0.4);
    }

    #[test]
    fn unknown_format_is_an_input_error() {
        let err = run_convert(false, "#ffffff", Some("cmyk")).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn unparseable_color_is_a_color_error() {
        let err = run_convert(false, "not-a-color", None).err().unwrap();
        assert_eq!(err.exit_code(), 10);
        let err = run_pick(false, "#12", false).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn generate_css_prints_custom_properties() {
        let args = config_args(&[]);
        assert!(run_generate(false, &args, "oklch", true).is_ok());
        assert!(run_generate(true, &args, "oklch", true).is_ok());
    }

    #[test]
    fn format_palette_converts_every_color() {
        let palette = Studio::uncached().generate_palette(&ColorConfig::default());
        let colors = format_palette(&palette, ColorFormat::Hex);
        assert_eq!(colors.len(), 15);
        assert_eq!(colors[0].0, "bg-dark");
        assert!(colors.iter().all(|(_, v)| v.starts_with('#') && v.len() == 7));
    }

    #[test]
    fn project_commands_persist_to_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let project = |args: &[&str]| {
            let mut full = vec!["project", "--store", path.to_str().unwrap()];
            full.extend_from_slice(args);
            run(parse(&full))
        };

        assert!(project(&["create", "brand"]).is_ok());
        assert!(project(&["save", "brand", "main", "--hue", "200"]).is_ok());
        assert_eq!(project(&["create", "brand"]).err().unwrap().exit_code(), 14);
        assert_eq!(project(&["show", "nope"]).err().unwrap().exit_code(), 14);

        let store = ProjectStore::open(&path).unwrap();
        let saved = store.project("brand").unwrap().palette("main").unwrap();
        assert_eq!(saved.config.hue, 200.0);

        assert!(project(&["remove", "brand", "main"]).is_ok());
        assert!(project(&["delete", "brand"]).is_ok());
        assert!(ProjectStore::open(&path).unwrap().list_projects().is_empty());
    }
}
