pub const TITLE: &str = "Content Generation Engine";
pub const HISTORY_HEADING: &str = "Generation History";
pub const LABEL_URL: &str = "News Article URL";
pub const LABEL_STANCE: &str = "Political Stance";
pub const URL_PLACEHOLDER: &str = "https://example.com/news/article";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const RULE_WIDTH: usize = 60;

pub const HELP: &str = "\
Commands:
  url <address>        set the article URL (no address clears it)
  stance pro|anti      pick the stance
  submit               generate content for the current URL and stance
  refresh              reload the generation history
  toggle <id|row>      expand or collapse a history entry
  show                 redraw the console
  help                 show this text
  quit                 leave the console";
