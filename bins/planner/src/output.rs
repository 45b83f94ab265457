use planner_shared::AppError;
use serde::Serialize;

#[derive(Serialize)]
struct JsonOut<T> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct JsonErr<'a> {
    ok: bool,
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> Result<(), AppError> {
    if json {
        print_json(&JsonOut { ok: true, data })
    } else {
        for d in data {
            println!("{}", row(d));
        }
        Ok(())
    }
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: &T,
    render: impl Fn(&T) -> String,
) -> Result<(), AppError> {
    if json {
        print_json(&JsonOut { ok: true, data })
    } else {
        println!("{}", render(data));
        Ok(())
    }
}

pub fn print_error(json: bool, err: &AppError) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: err.error_code(),
                message: err.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("error: {err}"),
        }
    } else {
        eprintln!("error: {err}");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))?;
    println!("{text}");
    Ok(())
}
