use dk_core::{Props, to_share_string};

pub fn run(assignments: &[String]) -> Result<(), String> {
    let mut props = Props::new();
    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            return Err(format!("invalid assignment '{assignment}', expected KEY=VALUE"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid assignment '{assignment}', empty key"));
        }
        props.insert(key.to_string(), value.trim().to_string());
    }

    println!("{}", to_share_string(&props));
    Ok(())
}
