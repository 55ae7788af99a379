// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

use crate::config::settings::Settings;

/// 命令行参数
///
/// 所有参数都是可选的，给出时覆盖配置文件和环境变量中的值
#[derive(Debug, Default, Parser)]
#[command(name = "wordcrawl")]
#[command(about = "Fetch articles concurrently and rank lexicon words by frequency")]
pub struct Cli {
    /// Maximum number of concurrent fetches
    #[arg(short = 'k', long)]
    pub concurrency: Option<usize>,

    /// Global deadline in seconds
    #[arg(long, value_name = "SECS")]
    pub deadline_secs: Option<u64>,

    /// Delay before each request in milliseconds
    #[arg(long, value_name = "MS")]
    pub pacing_ms: Option<u64>,

    /// Lexicon file, one word per line
    #[arg(long, value_name = "PATH")]
    pub lexicon: Option<String>,

    /// Resource list, one URL per line
    #[arg(long, value_name = "PATH")]
    pub urls: Option<String>,

    /// Number of entries in the final ranking
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Hand fetched text over through files in this directory
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<String>,

    /// Print the report as JSON with a run summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// 将命令行覆盖项写入配置
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(k) = self.concurrency {
            settings.pipeline.concurrency = k;
        }
        if let Some(secs) = self.deadline_secs {
            settings.pipeline.deadline_secs = secs;
        }
        if let Some(ms) = self.pacing_ms {
            settings.http.pacing_ms = ms;
        }
        if let Some(path) = &self.lexicon {
            settings.input.lexicon_path = path.clone();
        }
        if let Some(path) = &self.urls {
            settings.input.resources_path = path.clone();
        }
        if let Some(n) = self.top {
            settings.pipeline.top_n = n;
        }
        if let Some(dir) = &self.scratch_dir {
            settings.scratch.storage_type = "local".to_string();
            settings.scratch.local_path = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_settings() {
        let cli = Cli::try_parse_from(["wordcrawl"]).unwrap();
        let mut settings = Settings::defaults().unwrap();
        cli.apply(&mut settings);

        assert_eq!(settings.pipeline.concurrency, 500);
        assert_eq!(settings.scratch.storage_type, "memory");
        assert!(!cli.json);
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "wordcrawl",
            "-k",
            "8",
            "--deadline-secs",
            "30",
            "--pacing-ms",
            "0",
            "--lexicon",
            "words.txt",
            "--urls",
            "urls.txt",
            "-n",
            "3",
            "--scratch-dir",
            "/tmp/wordcrawl",
            "--json",
        ])
        .unwrap();
        let mut settings = Settings::defaults().unwrap();
        cli.apply(&mut settings);

        assert_eq!(settings.pipeline.concurrency, 8);
        assert_eq!(settings.pipeline.deadline_secs, 30);
        assert_eq!(settings.http.pacing_ms, 0);
        assert_eq!(settings.input.lexicon_path, "words.txt");
        assert_eq!(settings.input.resources_path, "urls.txt");
        assert_eq!(settings.pipeline.top_n, 3);
        assert_eq!(settings.scratch.storage_type, "local");
        assert_eq!(settings.scratch.local_path.as_deref(), Some("/tmp/wordcrawl"));
        assert!(cli.json);
    }

    #[test]
    fn test_rejects_non_numeric_concurrency() {
        assert!(Cli::try_parse_from(["wordcrawl", "--concurrency", "many"]).is_err());
    }
}
