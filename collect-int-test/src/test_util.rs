use collect::collection::{Collection, Document};
use collect::common::Value;
use collect::config::CollectConfig;
use collect::doc;
use collect::errors::CollectResult;
use std::backtrace::Backtrace;
use std::time::Instant;

/// Runs a test between a `before` fixture and an `after` teardown.
///
/// `after` runs even when the test fails. Errors and panics are reported with
/// the elapsed time and a backtrace, then re-raised as a panic so the test
/// harness marks the test failed.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> CollectResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> CollectResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> CollectResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();

    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => match test(ctx.clone()) {
                Ok(_) => after(ctx)
                    .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                Err(e) => {
                    let _ = after(ctx);
                    Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                }
            },
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let elapsed = start_time.elapsed();
    let (error, backtrace) = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => (e, bt),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {:?}", elapsed);
    eprintln!("Error: {}", error);
    if !backtrace.is_empty() && !backtrace.contains("disabled") {
        eprintln!("\nBacktrace:\n{}", backtrace);
    }
    eprintln!("=====================================================\n");

    panic!("Test failed: {}", error);
}

#[derive(Clone)]
pub struct TestContext {
    people: Collection,
    orders: Collection,
}

impl TestContext {
    pub fn new(people: Collection, orders: Collection) -> Self {
        Self { people, orders }
    }

    /// Shares the people fixture; mutations are visible to the context.
    pub fn people(&self) -> Collection {
        self.people.clone()
    }

    pub fn orders(&self) -> Collection {
        self.orders.clone()
    }
}

pub fn create_test_context() -> CollectResult<TestContext> {
    let people = collect::collect(create_test_docs())?;
    let orders = collect::collect(create_test_orders())?;
    Ok(TestContext::new(people, orders))
}

pub fn cleanup(_ctx: TestContext) -> CollectResult<()> {
    CollectConfig::new().reset();
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    let doc1 = doc! {
        id: 1,
        first_name: "fn1",
        last_name: "ln1",
        age: 41,
        city: "Oslo",
        address: { street: "Storgata 1", zip: "0155" },
        tags: ["admin", "dev"],
        active: true,
    };

    let doc2 = doc! {
        id: 2,
        first_name: "fn2",
        last_name: "ln2",
        age: "17",
        city: "Rome",
        address: { street: "Via Roma 2", zip: "00184" },
        tags: [],
        active: false,
    };

    let doc3 = doc! {
        id: 3,
        first_name: "fn3",
        last_name: "ln2",
        age: 30,
        city: "Oslo",
        address: { street: "Karl Johans gate 3", zip: "0154" },
        tags: ["dev"],
        active: true,
    };

    let doc4 = doc! {
        id: 4,
        first_name: "fn4",
        last_name: "ln4",
        age: "25 years",
        city: "Lima",
        address: { street: "Jiron 4", zip: "15001" },
        tags: ["ops"],
    };

    vec![doc1, doc2, doc3, doc4]
}

pub fn create_test_orders() -> Vec<Document> {
    vec![
        doc! { order_id: 100, customer: 1, total: 30, status: "paid" },
        doc! { order_id: 101, customer: 2, total: 12, status: "open" },
        doc! { order_id: 102, customer: 1, total: 7, status: "paid" },
        doc! { order_id: 103, customer: 3, total: 55, status: "refunded" },
        doc! { order_id: 104, customer: 1, total: 19, status: "open" },
    ]
}

/// Sums the integer values of a collection.
pub fn sum(collection: &Collection) -> CollectResult<i64> {
    let total = collection.reduce(|acc, item| {
        Value::from(acc.to_i64().unwrap_or(0) + item.to_i64().unwrap_or(0))
    })?;
    Ok(total.to_i64().unwrap_or(0))
}

pub fn is_sorted<T: Ord>(iterable: impl IntoIterator<Item = T>, ascending: bool) -> bool {
    let mut iter = iterable.into_iter();
    if let Some(mut prev) = iter.next() {
        for current in iter {
            if ascending {
                if prev > current {
                    return false;
                }
            } else if prev < current {
                return false;
            }
            prev = current;
        }
    }
    true
}
