//! Example demonstrating query evaluation over a sales matrix

use salesql::expression::{
    evaluate_query, free_variables, Environment, Formula, NumExpr, Query, QueryChecker,
    QueryEvaluator, SetExpr, TypeKind,
};
use salesql::SalesMatrix;

fn main() -> anyhow::Result<()> {
    println!("SalesQL Query Demo");
    println!("==================");

    // Three products sold over five days
    let matrix = SalesMatrix::from_text(
        "# mon tue wed thu fri
         12  15   9  20  18
          0   3   0   4   1
          7   7   7   7   7",
    )?;
    println!(
        "\nMatrix: {} products x {} days, {} sales in total",
        matrix.products(),
        matrix.days(),
        matrix.total()
    );

    // Example 1: Numeric queries
    println!("\n1. Numeric Queries");
    println!("------------------");

    let queries = vec![
        Query::from(NumExpr::product_total(NumExpr::literal(1))),
        Query::from(NumExpr::day_total(NumExpr::literal(4))),
        Query::from(NumExpr::div(
            NumExpr::month_total(),
            NumExpr::size(SetExpr::days()),
        )),
    ];
    for query in &queries {
        println!("{} = {}", query, evaluate_query(query, &matrix)?);
    }

    // Example 2: Set queries
    println!("\n2. Set Queries");
    println!("--------------");

    // Days on which every product sold something
    let busy_days = Query::from(SetExpr::comprehension(
        TypeKind::Day,
        "d",
        Formula::forall(
            "p",
            TypeKind::Product,
            Formula::gt(
                NumExpr::sales_at(NumExpr::var("p"), NumExpr::var("d")),
                NumExpr::literal(0),
            ),
        ),
    ));
    println!("{} = {}", busy_days, evaluate_query(&busy_days, &matrix)?);

    let odd_one_out = Query::from(SetExpr::difference(SetExpr::sales(), SetExpr::days()));
    println!("{} = {}", odd_one_out, evaluate_query(&odd_one_out, &matrix)?);

    // Example 3: Formulas
    println!("\n3. Formulas");
    println!("-----------");

    let steady_seller = Query::from(Formula::exists(
        "p",
        TypeKind::Product,
        Formula::forall(
            "d",
            TypeKind::Day,
            Formula::eq(
                NumExpr::sales_at(NumExpr::var("p"), NumExpr::var("d")),
                NumExpr::sales_at(NumExpr::var("p"), NumExpr::literal(1)),
            ),
        ),
    ));
    println!("{} = {}", steady_seller, evaluate_query(&steady_seller, &matrix)?);

    // Example 4: Checking and errors
    println!("\n4. Checking and Errors");
    println!("----------------------");

    let open = Query::from(Formula::gt(
        NumExpr::product_total(NumExpr::var("p")),
        NumExpr::var("threshold"),
    ));
    println!("free variables of {}: {:?}", open, free_variables(&open));

    let checker = QueryChecker::new(&matrix);
    let mut env = Environment::new();
    if let Err(e) = checker.check(&open, &env) {
        println!("check with empty environment: {}", e);
    }

    env.push("p", 3);
    env.push("threshold", 30);
    let evaluator = QueryEvaluator::new(&matrix);
    println!(
        "with p = 3, threshold = 30: {}",
        evaluator.evaluate(&open, &mut env)?
    );

    let bad = Query::from(NumExpr::sales_at(NumExpr::literal(4), NumExpr::literal(1)));
    if let Err(e) = evaluate_query(&bad, &matrix) {
        println!("{}: {}", bad, e);
    }

    let zero = Query::from(NumExpr::div(NumExpr::literal(1), NumExpr::literal(0)));
    if let Err(e) = evaluate_query(&zero, &matrix) {
        println!("{}: {}", zero, e);
    }

    Ok(())
}
