//! Trace scenarios: single operator, several operators, full chain, unknown key.

use named_params::{ops, Applicator, ApplyReport, NamedParameters, ParamDict, ParamError};

pub struct Scenario {
    pub title: &'static str,
    pub function: &'static str,
    pub dict: ParamDict,
    pub ops: Vec<&'static str>,
}

pub struct Outcome {
    pub title: &'static str,
    pub chain: String,
    pub report: ApplyReport,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            title: "single operator",
            function: "compute_face_normals",
            dict: ParamDict::new().with("verbose", 1i64),
            ops: vec![ops::VERBOSE],
        },
        Scenario {
            title: "multiple operators",
            function: "smooth_shape",
            dict: ParamDict::new()
                .with("vertex_point_map", 42i64)
                .with("geom_traits", 99i64),
            ops: vec![ops::VERTEX_POINT_MAP, ops::GEOM_TRAITS],
        },
        Scenario {
            title: "full chain",
            function: "isotropic_remeshing",
            dict: ParamDict::new()
                .with("vertex_point_map", 123i64)
                .with("geom_traits", 456i64)
                .with("verbose", 1i64),
            ops: vec![ops::VERTEX_POINT_MAP, ops::GEOM_TRAITS, ops::VERBOSE],
        },
        Scenario {
            title: "unknown parameter",
            function: "test_function",
            dict: ParamDict::new()
                .with("vertex_point_map", 111i64)
                .with("unknown_param", 999i64)
                .with("verbose", 1i64),
            ops: vec![ops::VERTEX_POINT_MAP, ops::VERBOSE],
        },
    ]
}

pub fn run(scenario: &Scenario) -> Result<Outcome, ParamError> {
    let ops = scenario
        .ops
        .iter()
        .filter_map(|name| ops::by_name(name))
        .collect();
    tracing::info!(
        scenario = scenario.title,
        function = scenario.function,
        ops = ?scenario.ops,
        "starting from default_values()"
    );
    let (np, report) =
        Applicator::new(ops).apply_with_report(NamedParameters::default_values(), &scenario.dict)?;
    tracing::info!(
        function = scenario.function,
        chain = %np,
        unknown = ?report.unknown,
        "final parameter chain"
    );
    Ok(Outcome {
        title: scenario.title,
        chain: np.chain(),
        report,
    })
}
