use colored::Colorize;

use dk_core::catalog;
use dk_mechanics::{
    BonusDie, Check, CheckMode, CheckNature, RngEntropy, RollCommand, resolve,
};

/// Everything the roll subcommand needs.
pub struct Options {
    pub stat: String,
    pub share: Option<String>,
    pub dc: Option<i32>,
    pub resisted: bool,
    pub contested: bool,
    pub extra: Option<i32>,
    pub luck: Option<i32>,
    pub seed: u64,
    pub print_command: bool,
}

pub async fn run(options: &Options) -> Result<(), String> {
    let (_, tree) = super::load_character(options.share.as_deref())?;

    let stat = catalog()
        .find(&options.stat)
        .ok_or_else(|| format!("unknown stat: {}", options.stat))?;
    let modifier = tree
        .modifier(stat.name)
        .map_err(|e| e.to_string())?
        .resolved();

    let mode = if options.contested {
        CheckMode::Contested
    } else {
        CheckMode::Static
    };
    let nature = if options.resisted {
        CheckNature::Resisted
    } else {
        CheckNature::Active
    };
    let descriptor = format!("{} check", stat.name);
    let check = Check::new(mode, nature, descriptor, modifier);

    let mut command = RollCommand::new(check);
    if let Some(dc) = options.dc {
        command = command.with_target(dc);
    }
    if let Some(threshold) = options.extra {
        command = command.with_extra(BonusDie::new("extra", threshold));
    }
    if let Some(threshold) = options.luck {
        command = command.with_luck(BonusDie::new("luck", threshold));
    }

    if options.print_command {
        println!("{}", command.encode().map_err(|e| e.to_string())?);
        return Ok(());
    }

    let spec = command.spec();
    let mut provider = RngEntropy::seeded(options.seed);
    let outcome = resolve(&spec, &mut provider)
        .await
        .map_err(|e| e.to_string())?;

    println!("  {}", command.check.to_string().bold());
    for die in &outcome.dice {
        let validity = if die.valid { "" } else { " (invalid)" };
        println!("  {} d12: {}{validity}", die.tag, die.value);
    }
    if outcome.crit_modifiers != 0 {
        println!("  crit bonus: +{}", outcome.crit_modifiers);
    }
    if outcome.auto_fail {
        println!("  {}", "double 1s: automatic failure".red().bold());
    }
    println!(
        "  dice {} + modifier {} + crit {} = total {}",
        outcome.selected[0] + outcome.selected[1],
        spec.modifier_value,
        outcome.crit_modifiers,
        outcome.total
    );

    match outcome.success {
        Some(true) => {
            let label = if outcome.shifts > 0 {
                format!("SUCCESS with {} shift(s)", outcome.shifts)
            } else {
                "SUCCESS".to_string()
            };
            println!("  {}", label.green().bold());
        }
        Some(false) => println!("  {}", "FAILURE".red().bold()),
        None => println!("  no target, resolve externally"),
    }

    Ok(())
}
