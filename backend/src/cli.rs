use clap::{ArgGroup, Args, Parser, Subcommand};

use moodmix_core::domain::{MoodInput, MoodInputError};

#[derive(Parser, Debug)]
#[command(name = "moodmix", version, about = "Generate playlists from a color, emojis, a feeling or a point on the mood map")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Generates a playlist for the given mood.
  Generate(GenerateArgs),

  /// Lists the most recent saved playlists.
  History {
    #[arg(long, default_value_t = 20)]
    limit: usize,
  },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mood").required(true).args(["color", "emoji", "emotion", "point"])))]
pub struct GenerateArgs {
  /// Hex color, `#RRGGBB` or `RRGGBB`.
  #[arg(long)]
  pub color: Option<String>,

  /// One to five emojis.
  #[arg(long, num_args = 1..)]
  pub emoji: Vec<String>,

  /// Free text describing how you feel.
  #[arg(long)]
  pub emotion: Option<String>,

  /// Mood map point `X,Y`, both in [0,1]: x drives danceability and energy, y drives acousticness and valence.
  #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
  pub point: Option<(f64, f64)>,

  /// Number of tracks.
  #[arg(long)]
  pub size: Option<usize>,

  #[arg(long)]
  pub name: Option<String>,

  #[arg(long)]
  pub description: Option<String>,

  /// Also create the playlist on Spotify.
  #[arg(long)]
  pub save_to_spotify: bool,

  /// Print the playlist as JSON.
  #[arg(long)]
  pub json: bool,
}

impl GenerateArgs {
  pub fn mood(&self) -> Result<MoodInput, MoodInputError> {
    if let Some(color) = &self.color {
      return MoodInput::color(color);
    }
    if let Some((x, y)) = self.point {
      return MoodInput::coordinate(x, y);
    }
    if let Some(text) = &self.emotion {
      return Ok(MoodInput::Emotion(text.clone()));
    }
    Ok(MoodInput::Emoji(self.emoji.clone()))
  }
}

fn parse_point(raw: &str) -> Result<(f64, f64), String> {
  let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected X,Y, got {raw:?}"))?;
  let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
  Ok((parse(x)?, parse(y)?))
}
