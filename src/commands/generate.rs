use tracing::{debug, info};

use super::render::render_workout;
use super::{Command, Context};
use crate::error::{FitError, Result, ResultExt};
use crate::input::{options, InputMode};
use crate::parse::parse_exercise_count;
use crate::prompt::build_prompt;
use crate::response::parse_workout_response;
use crate::workout::WorkoutStatus;

const GENERATE_USAGE: &str = "usage: fitrec exercise generate [count]";

/// Ask the model for the next workout based on the full history
pub struct GenerateCommand {
    args: Vec<String>,
    /// `None` lets the model pick how many exercises
    exercise_count: Option<u8>,
}

impl GenerateCommand {
    pub fn new(args: &[String]) -> Self {
        GenerateCommand {
            args: args.to_vec(),
            exercise_count: None,
        }
    }
}

impl Command for GenerateCommand {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn validate(&mut self) -> Result<()> {
        self.exercise_count = match self.args.as_slice() {
            [] => None,
            [count] => Some(parse_exercise_count(count)?),
            _ => return Err(FitError::Usage(GENERATE_USAGE.to_string())),
        };
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let history = ctx.storage.get_all_workouts().context("error fetching workouts")?;
        if history.is_empty() {
            return Err(FitError::NoData);
        }

        let prompt = build_prompt(&history, self.exercise_count, ctx.ai.prompt_suffix());
        debug!(workouts = history.len(), count = ?self.exercise_count, "built prompt");

        println!("Generating your next workout, this may take a while...");
        let response = ctx
            .ai
            .generate(&prompt, ctx.timeout)
            .context("error generating response")?;

        let mut generated = parse_workout_response(&response).context("error parsing workout response")?;

        println!();
        print!("{}", render_workout(&generated));
        println!();

        let Some(answer) = ctx.input.get_input(
            "Save this workout as 'planned'?",
            &options(&["yes", "no"]),
            InputMode::Choice,
        ) else {
            println!("Workout discarded");
            return Ok(());
        };

        if !matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
            println!("Workout not saved");
            return Ok(());
        }

        generated.workout.status = Some(WorkoutStatus::Planned);
        let id = ctx
            .storage
            .save_generated_workout(&generated)
            .context("error saving planned workout")?;
        info!(id, "saved generated workout");
        println!("✓ Workout saved as 'planned'");
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise generate [count]\n    Generate the next workout from your history (count: 1-20 exercises)"
    }
}
