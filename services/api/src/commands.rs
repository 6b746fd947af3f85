use crate::infra::parse_answers;
use archetype_quiz::config::QuizConfig;
use archetype_quiz::error::AppError;
use archetype_quiz::quiz::{
    decode_share_token, find_preset, presets, progress_of, share_link, AnswerSet, AnswerStore,
    ColorScores, QuizEngine, QuizProgress, QuizResult, ResultExport, SanitizedAnswers,
};
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AnswerArgs {
    /// Question id, e.g. opening_hand
    pub(crate) question: String,
    /// Choice key as shown by `quiz questions`
    pub(crate) choice: String,
}

/// Where a command takes its answers from; stored answers when none is given.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub(crate) struct SourceArgs {
    /// Answers as comma-separated question=KEY pairs
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: Option<AnswerSet>,
    /// Use a named preset (see `quiz presets`)
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Share token or full share link
    #[arg(long)]
    pub(crate) share: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ResultArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Resolve even when some questions are unanswered
    #[arg(long)]
    pub(crate) allow_partial: bool,
    /// Write the result as JSON to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ShareArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Override the configured share base URL
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let engine = QuizEngine::standard();
    for (index, question) in engine.bank().questions().iter().enumerate() {
        println!("{}. {} [{}]", index + 1, question.prompt, question.id);
        for choice in &question.choices {
            let weights = choice
                .weights
                .iter()
                .map(|weight| format!("+{} {}", weight.weight, weight.color.code()))
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {}) {} ({})", choice.key, choice.label, weights);
        }
    }
    Ok(())
}

pub(crate) fn run_presets() -> Result<(), AppError> {
    let engine = QuizEngine::standard();
    for preset in presets() {
        let result = engine.build_result(&preset.answers());
        println!(
            "- {}: {} -> {} ({})",
            preset.id, preset.label, result.commander.title, result.identity_label
        );
    }
    Ok(())
}

pub(crate) fn run_answer(config: &QuizConfig, args: AnswerArgs) -> Result<(), AppError> {
    let engine = QuizEngine::standard();
    let (question, choice) = engine.bank().select(&args.question, &args.choice)?;
    let store = AnswerStore::new(config.answers_path.clone());

    let mut answers = store
        .load(engine.bank())?
        .map(|stored| stored.to_answer_set())
        .unwrap_or_default();
    answers.insert(question.id, choice.key.as_str());

    let answers = engine.sanitize(&answers);
    store.save(&answers)?;
    info!(question = question.id, choice = %choice.key, "answer recorded");

    println!("Recorded {} -> {}) {}", question.id, choice.key, choice.label);
    println!("{}", render_progress(progress_of(&answers)));
    if answers.is_complete() {
        println!("All questions answered; run `quiz result` to see your commander.");
    }
    Ok(())
}

pub(crate) fn run_reset(config: &QuizConfig) -> Result<(), AppError> {
    AnswerStore::new(config.answers_path.clone()).clear()?;
    println!("Cleared stored answers at {}", config.answers_path.display());
    Ok(())
}

pub(crate) fn run_result(config: &QuizConfig, args: ResultArgs) -> Result<(), AppError> {
    let ResultArgs {
        source,
        allow_partial,
        export,
    } = args;

    let engine = QuizEngine::standard();
    let answers = resolve_source(engine, config, source)?;
    if !allow_partial {
        engine.ensure_complete(&answers.to_answer_set())?;
    }

    let result = engine.result_for(&answers);
    print!("{}", render_result(&result, progress_of(&answers)));

    if let Some(path) = export {
        let payload = ResultExport::new(&answers, result, Utc::now()).to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, payload)?;
        println!("Exported result to {}", path.display());
    }
    Ok(())
}

pub(crate) fn run_share(config: &QuizConfig, args: ShareArgs) -> Result<(), AppError> {
    let ShareArgs { source, base_url } = args;

    let engine = QuizEngine::standard();
    let answers = resolve_source(engine, config, source)?;
    let base_url = base_url.unwrap_or_else(|| config.share_base_url.clone());

    if answers.is_empty() {
        println!("No answers to share yet; {base_url}");
        return Ok(());
    }
    println!("{}", share_link(&base_url, &answers));
    Ok(())
}

fn resolve_source(
    engine: QuizEngine<'static>,
    config: &QuizConfig,
    source: SourceArgs,
) -> Result<SanitizedAnswers<'static>, AppError> {
    let SourceArgs {
        answers,
        preset,
        share,
    } = source;

    if let Some(answers) = answers {
        return Ok(engine.sanitize(&answers));
    }
    if let Some(id) = preset {
        let preset = find_preset(&id).ok_or(AppError::UnknownPreset(id))?;
        return Ok(engine.sanitize(&preset.answers()));
    }
    if let Some(raw) = share {
        let token = raw.rsplit_once('#').map_or(raw.as_str(), |(_, token)| token);
        return Ok(decode_share_token(engine.bank(), token)?);
    }

    let stored = AnswerStore::new(config.answers_path.clone()).load(engine.bank())?;
    Ok(stored.unwrap_or_else(|| SanitizedAnswers::empty(engine.bank())))
}

fn render_progress(progress: QuizProgress) -> String {
    format!(
        "Progress: {}/{} answered ({}%)",
        progress.answered, progress.total, progress.percent
    )
}

fn render_scores(scores: &ColorScores) -> String {
    scores
        .iter()
        .map(|(color, score)| format!("{} {}", color.code(), score))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_result(result: &QuizResult, progress: QuizProgress) -> String {
    let commander = &result.commander;
    format!(
        "Color identity: {} [{}]\nScores: {}\n{}\nCommander: {} ({})\n  {}\n  {}\nMatch: {}\n",
        result.identity_label,
        result.identity_key,
        render_scores(&result.scores),
        render_progress(progress),
        commander.title,
        commander.identity,
        commander.subtitle,
        commander.summary,
        result.fallback.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use archetype_quiz::quiz::QuestionBank;

    fn config(dir: &tempfile::TempDir) -> QuizConfig {
        QuizConfig {
            answers_path: dir.path().join("nested").join("answers.json"),
            share_base_url: "https://quiz.test/".to_string(),
        }
    }

    fn answer(config: &QuizConfig, question: &str, choice: &str) -> Result<(), AppError> {
        run_answer(
            config,
            AnswerArgs {
                question: question.to_string(),
                choice: choice.to_string(),
            },
        )
    }

    #[test]
    fn answers_accumulate_in_the_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);

        answer(&config, "opening_hand", "A").expect("first answer");
        answer(&config, "comeback", "B").expect("second answer");
        answer(&config, "opening_hand", "C").expect("changed answer");

        let stored = AnswerStore::new(config.answers_path.clone())
            .load(QuestionBank::standard())
            .expect("store readable")
            .expect("answers stored");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.to_answer_set().get("opening_hand"), Some("C"));
    }

    #[test]
    fn invalid_answers_are_rejected_before_touching_the_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);

        let err = answer(&config, "opening_hand", "Q").expect_err("bad key rejected");
        assert!(matches!(err, AppError::Selection(_)));
        assert!(!config.answers_path.exists());
    }

    #[test]
    fn reset_clears_stored_answers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);

        answer(&config, "toolkit", "A").expect("answer recorded");
        run_reset(&config).expect("reset succeeds");
        assert!(!config.answers_path.exists());
    }

    #[test]
    fn result_requires_completion_unless_partial() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);
        answer(&config, "toolkit", "A").expect("answer recorded");

        let err = run_result(
            &config,
            ResultArgs {
                source: SourceArgs::default(),
                allow_partial: false,
                export: None,
            },
        )
        .expect_err("incomplete answers rejected");
        match err {
            AppError::Incomplete(incomplete) => assert_eq!(incomplete.missing.len(), 7),
            other => panic!("unexpected error: {other:?}"),
        }

        run_result(
            &config,
            ResultArgs {
                source: SourceArgs::default(),
                allow_partial: true,
                export: None,
            },
        )
        .expect("partial result allowed");
    }

    #[test]
    fn result_export_writes_json_payload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);
        let export = dir.path().join("exports").join("result.json");

        run_result(
            &config,
            ResultArgs {
                source: SourceArgs {
                    preset: Some("azorius-control".to_string()),
                    ..SourceArgs::default()
                },
                allow_partial: false,
                export: Some(export.clone()),
            },
        )
        .expect("result exported");

        let raw = fs::read_to_string(&export).expect("export written");
        let parsed: ResultExport = serde_json::from_str(&raw).expect("export parses");
        assert_eq!(parsed.answers.len(), 8);
        assert_eq!(parsed.result.identity_key.as_str(), "W");
    }

    #[test]
    fn unknown_preset_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);

        let err = resolve_source(
            QuizEngine::standard(),
            &config,
            SourceArgs {
                preset: Some("mono-black-zombies".to_string()),
                ..SourceArgs::default()
            },
        )
        .expect_err("unknown preset rejected");
        assert!(matches!(err, AppError::UnknownPreset(id) if id == "mono-black-zombies"));
    }

    #[test]
    fn share_source_accepts_full_links() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(&dir);
        let engine = QuizEngine::standard();
        let preset = find_preset("selesnya-ramp").expect("preset exists");
        let link = share_link(&config.share_base_url, &engine.sanitize(&preset.answers()));

        let answers = resolve_source(
            engine,
            &config,
            SourceArgs {
                share: Some(link),
                ..SourceArgs::default()
            },
        )
        .expect("link decodes");
        assert_eq!(answers.to_answer_set(), preset.answers());
    }

    #[test]
    fn render_result_names_commander_and_tier() {
        let engine = QuizEngine::standard();
        let answers = engine.sanitize(&AnswerSet::new());
        let rendered = render_result(&engine.result_for(&answers), progress_of(&answers));

        assert!(rendered.contains("Color identity: Colorless [none]"));
        assert!(rendered.contains("Karn, the Great Creator"));
        assert!(rendered.contains("Progress: 0/8 answered (0%)"));

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "Scores: W 0 | U 0 | B 0 | R 0 | G 0");
        assert_eq!(lines[6], "Match: Balanced or undecided");
        assert!(rendered.ends_with('\n'));
    }
}
