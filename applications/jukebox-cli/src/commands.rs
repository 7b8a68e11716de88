/// Console command parsing
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the playlist
    Load {
        ids: Vec<String>,
        shuffle: bool,
        autostart: bool,
    },
    Play,
    Pause,
    /// Click the play/pause button
    Toggle,
    /// Click the rewind button
    Rewind,
    /// Click the fast-forward button
    Next,
    /// Move the playhead of the current track
    Seek(Duration),
    /// Let the current track run out
    End,
    /// Pause the audio object without going through the player
    Interrupt,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  load <id>... [--shuffle] [--autostart]   replace the playlist
  play | pause                             start or pause playback
  toggle | rewind | next                   click a toolbar button
  seek <seconds>                           move the playhead
  end                                      finish the current track
  interrupt                                pause the audio behind the player
  status                                   show playback state
  help | quit";

/// Parse one input line; `Ok(None)` for blank lines
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "load" => {
            let mut ids = Vec::new();
            let mut shuffle = false;
            let mut autostart = false;
            for word in words {
                match word {
                    "--shuffle" | "-s" => shuffle = true,
                    "--autostart" | "-a" => autostart = true,
                    flag if flag.starts_with('-') => {
                        return Err(format!("unknown flag '{flag}'"));
                    }
                    id => ids.extend(id.split(',').filter(|s| !s.is_empty()).map(String::from)),
                }
            }
            Command::Load {
                ids,
                shuffle,
                autostart,
            }
        }
        "play" => Command::Play,
        "pause" => Command::Pause,
        "toggle" | "t" => Command::Toggle,
        "rewind" | "prev" | "r" => Command::Rewind,
        "next" | "ff" | "n" => Command::Next,
        "seek" => {
            let secs = words
                .next()
                .ok_or_else(|| "seek needs a position in seconds".to_string())?;
            let secs: f64 = secs
                .parse()
                .map_err(|_| format!("'{secs}' is not a number of seconds"))?;
            let position = Duration::try_from_secs_f64(secs)
                .map_err(|_| format!("'{secs}' is not a valid position"))?;
            Command::Seek(position)
        }
        "end" => Command::End,
        "interrupt" => Command::Interrupt,
        "status" | "s" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_load_with_flags() {
        let command = parse("load 111 rbxassetid://222,333 --shuffle").unwrap();
        assert_eq!(
            command,
            Some(Command::Load {
                ids: vec![
                    "111".to_string(),
                    "rbxassetid://222".to_string(),
                    "333".to_string()
                ],
                shuffle: true,
                autostart: false,
            })
        );
    }

    #[test]
    fn test_load_rejects_unknown_flag() {
        assert!(parse("load 1 --loop").is_err());
    }

    #[test]
    fn test_seek() {
        assert_eq!(
            parse("seek 6.5"),
            Ok(Some(Command::Seek(Duration::from_millis(6500))))
        );
        assert!(parse("seek").is_err());
        assert!(parse("seek soon").is_err());
        assert!(parse("seek -1").is_err());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("N"), Ok(Some(Command::Next)));
        assert_eq!(parse("prev"), Ok(Some(Command::Rewind)));
        assert_eq!(parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse("dance").is_err());
    }
}
