//! Command-line flags for the studio binary.

use std::fmt;
use std::path::PathBuf;

use landscape_engine::coords::Viewport;
use landscape_scene::SceneConfig;

pub const USAGE: &str = "\
usage: landscape-studio [options]

  --snapshot <png>    render headless and write the last frame as PNG
  --frames <n>        frames to render for --snapshot (default 1)
  --seed <u64>        fixed random seed
  --snowflakes <n>    snowflake count (default 50)
  --width <px>        canvas width (default 800)
  --height <px>       canvas height (default 600)
  --extras            add the grass patch and the fractal star
  --log <filter>      env_logger filter, e.g. debug or landscape_scene=trace
  -h, --help          show this text";

#[derive(Debug, Clone, PartialEq)]
pub struct StudioArgs {
    pub snapshot: Option<PathBuf>,
    pub frames: u32,
    pub seed: Option<u64>,
    pub snowflakes: Option<usize>,
    pub width: u32,
    pub height: u32,
    pub extras: bool,
    pub log: Option<String>,
    pub help: bool,
}

impl Default for StudioArgs {
    fn default() -> Self {
        Self {
            snapshot: None,
            frames: 1,
            seed: None,
            snowflakes: None,
            width: 800,
            height: 600,
            extras: false,
            log: None,
            help: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgsError(String);

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{USAGE}", self.0)
    }
}

impl std::error::Error for ArgsError {}

impl StudioArgs {
    /// Parses flags, without the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::default();
        let mut it = args.into_iter().map(Into::into);

        while let Some(flag) = it.next() {
            let mut value = || {
                it.next()
                    .ok_or_else(|| ArgsError(format!("{flag} expects a value")))
            };

            match flag.as_str() {
                "--snapshot" => out.snapshot = Some(PathBuf::from(value()?)),
                "--frames" => out.frames = parse_num(&flag, &value()?)?,
                "--seed" => out.seed = Some(parse_num(&flag, &value()?)?),
                "--snowflakes" => out.snowflakes = Some(parse_num(&flag, &value()?)?),
                "--width" => out.width = parse_num(&flag, &value()?)?,
                "--height" => out.height = parse_num(&flag, &value()?)?,
                "--log" => out.log = Some(value()?),
                "--extras" => out.extras = true,
                "-h" | "--help" => out.help = true,
                other => return Err(ArgsError(format!("unknown option `{other}`"))),
            }
        }

        if out.frames == 0 {
            return Err(ArgsError("--frames must be at least 1".into()));
        }
        if out.width == 0 || out.height == 0 {
            return Err(ArgsError("--width and --height must be positive".into()));
        }
        if out.frames > 1 && out.snapshot.is_none() {
            return Err(ArgsError("--frames only applies to --snapshot".into()));
        }

        Ok(out)
    }

    pub fn canvas(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn scene_config(&self) -> SceneConfig {
        let defaults = SceneConfig::default();
        SceneConfig {
            canvas: self.canvas(),
            snowflake_count: self.snowflakes.unwrap_or(defaults.snowflake_count),
            seed: self.seed,
            extras: self.extras,
            ..defaults
        }
    }
}

fn parse_num<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError(format!("invalid value `{raw}` for {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StudioArgs, ArgsError> {
        StudioArgs::parse(args.iter().copied())
    }

    #[test]
    fn no_flags_opens_the_default_window() {
        let args = parse(&[]).unwrap();
        assert_eq!(args, StudioArgs::default());
        assert_eq!(args.canvas(), Viewport::new(800.0, 600.0));
        assert_eq!(args.scene_config(), SceneConfig::default());
    }

    #[test]
    fn snapshot_flags() {
        let args = parse(&[
            "--snapshot", "out.png", "--frames", "30", "--seed", "42", "--snowflakes", "0",
            "--extras",
        ])
        .unwrap();
        assert_eq!(args.snapshot, Some(PathBuf::from("out.png")));
        assert_eq!(args.frames, 30);

        let config = args.scene_config();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.snowflake_count, 0);
        assert!(config.extras);
    }

    #[test]
    fn canvas_size_reaches_the_scene() {
        let args = parse(&["--width", "1024", "--height", "768"]).unwrap();
        assert_eq!(args.scene_config().canvas, Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse(&["--seed"]).unwrap_err();
        assert!(err.to_string().contains("--seed expects a value"));
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = parse(&["--frames", "many"]).unwrap_err();
        assert!(err.to_string().contains("invalid value `many` for --frames"));
        assert!(parse(&["--frames", "0"]).is_err());
        assert!(parse(&["--width", "-3"]).is_err());
    }

    #[test]
    fn frames_without_snapshot_is_rejected() {
        let err = parse(&["--frames", "5"]).unwrap_err();
        assert!(err.to_string().contains("--frames only applies to --snapshot"));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse(&["--fullscreen"]).unwrap_err();
        assert!(err.to_string().contains("unknown option `--fullscreen`"));
    }

    #[test]
    fn log_filter_and_help() {
        let args = parse(&["--log", "debug", "-h"]).unwrap();
        assert_eq!(args.log.as_deref(), Some("debug"));
        assert!(args.help);
    }
}
