use chrono::{Duration, Local};
use sm2::{MemoryStore, ReviewManager, ReviewOutcome, SchedulerState, preview_all, review};

fn schedule_new_card() -> Result<(), Box<dyn std::error::Error>> {
    let state = SchedulerState::new();

    // Preview the next interval for each button
    let next_states = preview_all(&state);
    println!("Fail interval: {} ({})", next_states.fail.interval_days, next_states.fail.label);
    println!(
        "Medium interval: {} ({})",
        next_states.medium.interval_days, next_states.medium.label
    );
    println!(
        "Success interval: {} ({})",
        next_states.success.interval_days, next_states.success.label
    );

    // Assume the card was answered correctly
    let state = review(&state, ReviewOutcome::Success.quality().into());
    println!("State after review: {state:?}");
    Ok(())
}

fn schedule_with_manager() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ReviewManager::new(MemoryStore::new());
    manager.introduce("capital-of-france")?;

    // Review on three consecutive due dates
    let mut now = Local::now();
    for outcome in [
        ReviewOutcome::Success,
        ReviewOutcome::Success,
        ReviewOutcome::Medium,
    ] {
        let record = manager.review("capital-of-france", outcome, &now)?;
        println!(
            "{outcome}: interval {} days, next review due {}",
            record.state.interval_days, record.due
        );
        now += Duration::days(record.state.interval_days as i64);
    }

    let preview = manager.preview("capital-of-france")?;
    println!("Next success would wait: {}", preview.success.explanation);

    let today = Local::now().date_naive();
    println!(
        "Due now: {:?}, label: {}",
        manager.due_items(today)?,
        manager.due_label("capital-of-france", today)?
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Scheduling a new card:");
    schedule_new_card()?;

    println!("\nScheduling with a review manager:");
    schedule_with_manager()?;

    Ok(())
}
