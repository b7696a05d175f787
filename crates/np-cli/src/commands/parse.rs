use colored::Colorize;

use np_dice::RollRequest;

pub fn run(expression: &str) -> Result<(), String> {
    let request = np_dice::parse(expression).map_err(|e| e.to_string())?;

    println!("  {} {request}", "Expression:".bold());
    println!("  {} {}", "Shape:".bold(), request.shape());
    match &request {
        RollRequest::Direct { pool_size } => {
            println!("  {} {pool_size}", "Pool:".bold());
            if *pool_size <= 0 {
                println!("  (rolls a chance die)");
            }
        }
        _ => {
            println!("  {} {}", "Terms:".bold(), request.terms().join(", "));
            println!("  {} {:+}", "Modifier:".bold(), request.modifier());
        }
    }

    Ok(())
}
