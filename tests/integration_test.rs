use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::thread;
use tempfile::NamedTempFile;
use vibebridge::ir::{
    ConstantExpr, ConstraintType, DataType, EmbeddingDataType, LiteralType, ParsedExpr,
    ParsedExprType, SparseType,
};
use vibebridge::sql::{parse_condition, BinaryOperator, Expression, FunctionCall, FunctionKind};
use vibebridge::value::{Array, NdArray, SparseVector};
use vibebridge::{
    build_columns, check_valid_name, encode_constant, extract_filter, load_table_spec, parse_expr,
    translate_condition, wire, ErrorKind, NameKind, SearchOptions, TranslateError, Value,
};

fn translate(text: &str) -> ParsedExpr {
    translate_condition(&parse_condition(text).unwrap(), None).unwrap()
}

#[test]
fn test_search_filter_end_to_end() {
    let mut options = SearchOptions::new();
    options.insert("topn".to_string(), Value::Integer(10));
    options.insert(
        "filter".to_string(),
        Value::from("(price * 2 >= 100 OR category IN ('a', 'b')) AND NOT deleted"),
    );

    let filter = extract_filter(&mut options).unwrap().unwrap();
    assert!(!options.contains_key("filter"));

    let and = filter.as_function().unwrap();
    assert_eq!(and.func_name, "and");
    let or = and.arguments[0].as_function().unwrap();
    assert_eq!(or.func_name, "or");

    let gte = or.arguments[0].as_function().unwrap();
    assert_eq!(gte.func_name, ">=");
    assert_eq!(gte.arguments[0].as_function().unwrap().func_name, "*");

    let category = or.arguments[1].as_in().unwrap();
    assert!(category.in_type);
    assert_eq!(category.arguments.len(), 2);

    let not = and.arguments[1].as_function().unwrap();
    assert_eq!(not.func_name, "not");
    assert_eq!(
        not.arguments[0].as_column().unwrap().names,
        vec!["deleted".to_string()]
    );

    // The translated tree survives the engine payload
    let decoded: ParsedExpr = wire::decode(&wire::encode(&filter).unwrap()).unwrap();
    assert_eq!(decoded, filter);
}

#[test]
fn test_function_calls() {
    let expr = translate("ROUND(score, 2) > 0.5 AND my_udf(a, *) = 1");
    let and = expr.as_function().unwrap();

    let round = and.arguments[0].as_function().unwrap().arguments[0]
        .as_function()
        .unwrap();
    assert_eq!(round.func_name, "round");
    assert_eq!(round.arguments.len(), 2);

    let udf = and.arguments[1].as_function().unwrap().arguments[0]
        .as_function()
        .unwrap();
    assert_eq!(udf.func_name, "my_udf");
    assert_eq!(udf.arguments[1], ParsedExpr::star());
}

#[test]
fn test_untranslatable_filters() {
    for text in ["a BETWEEN 1 AND 2", "name LIKE 'a%'", "x IS NULL", "a || b"] {
        let node = parse_condition(text).unwrap();
        let err = translate_condition(&node, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpression, "{}", text);
    }
}

#[test]
fn test_malformed_filter_text() {
    let parens = format!("{}a = 1{}", "(".repeat(3000), ")".repeat(3000));
    let negations = format!("{}a", "NOT ".repeat(5000));
    let chain = vec!["a = 1"; 2000].join(" OR ");

    for text in [
        "name = 'abc",
        "\"name = 1",
        parens.as_str(),
        negations.as_str(),
        chain.as_str(),
    ] {
        let mut options = SearchOptions::new();
        options.insert("filter".to_string(), Value::from(text));
        let err = extract_filter(&mut options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpression);
        assert!(options.contains_key("filter"));
    }

    let star = translate("t.*");
    assert_eq!(star, ParsedExpr::star());
    assert!(star.as_column().unwrap().names.is_empty());
}

#[test]
fn test_literal_classification() {
    let cases: Vec<(Value, LiteralType)> = vec![
        (Value::Boolean(true), LiteralType::Boolean),
        (Value::Integer(1), LiteralType::Integer),
        (Value::Double(1.0), LiteralType::Double),
        (Value::from("s"), LiteralType::String),
        (Value::from(vec![1i64, 2]), LiteralType::IntegerArray),
        (Value::from(vec![1.0, 2.0]), LiteralType::DoubleArray),
        (Value::from(vec![vec![1i64]]), LiteralType::SubArrayArray),
        (Value::from(vec![vec![vec![1.0]]]), LiteralType::SubArrayArray),
        (Value::sparse_map([(0, 1i64), (2, 3)]), LiteralType::LongSparseArray),
        (Value::sparse_map([(0, 1.5)]), LiteralType::DoubleSparseArray),
        (
            Value::Sparse(SparseVector::integer(vec![1], vec![1])),
            LiteralType::LongSparseArray,
        ),
        (
            Value::Array(Array::new(vec![Value::Integer(1)])),
            LiteralType::CurlyBracketsArray,
        ),
    ];
    for (value, expected) in cases {
        assert_eq!(
            encode_constant(&value).unwrap().literal_type(),
            expected,
            "{:?}",
            value
        );
    }

    assert!(matches!(
        encode_constant(&Value::List(vec![])),
        Err(TranslateError::InvalidConstantType(_))
    ));
    assert!(matches!(
        encode_constant(&Value::Map(Default::default())),
        Err(TranslateError::EmptySparseVector)
    ));
    let deep = NdArray::doubles(vec![2, 2, 2, 2], vec![0.0; 16]).unwrap();
    assert!(matches!(
        encode_constant(&Value::NdArray(deep)),
        Err(TranslateError::InvalidConstantType(_))
    ));
}

#[test]
fn test_schema_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "id": {{"type": "int64", "constraints": ["primary key"]}},
            "title": {{"type": "varchar", "default": "untitled", "comment": "display title"}},
            "embedding": {{"type": "vector,128,float32"}},
            "terms": {{"type": "sparse,100,float,int32", "default": {{"3": 0.5}}}},
            "tags": {{"type": "array,varchar", "constraints": ["not null"]}}
        }}"#
    )
    .unwrap();

    let table = load_table_spec(file.path()).unwrap();
    let columns = build_columns(&table).unwrap();
    assert_eq!(columns.len(), 5);

    assert_eq!(columns[0].column_type, DataType::BigInt);
    assert_eq!(columns[0].constraints, vec![ConstraintType::PrimaryKey]);

    assert_eq!(columns[1].id, 1);
    assert_eq!(
        columns[1].default,
        ConstantExpr::String("untitled".to_string())
    );
    assert_eq!(columns[1].comment.as_deref(), Some("display title"));

    let embedding = columns[2].column_type.embedding_type().unwrap();
    assert_eq!(embedding.element_type, EmbeddingDataType::Float);
    assert_eq!(embedding.dimension, 128);

    assert_eq!(
        columns[3].column_type,
        DataType::Sparse(SparseType {
            element_type: EmbeddingDataType::Float,
            index_type: EmbeddingDataType::Int32,
            dimension: 100,
        })
    );
    assert_eq!(
        columns[3].default,
        ConstantExpr::DoubleSparseArray {
            indices: vec![3],
            values: vec![0.5]
        }
    );

    assert_eq!(
        columns[4].column_type,
        DataType::Array(Box::new(DataType::Varchar))
    );
}

#[test]
fn test_schema_file_errors() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"ok": {{"type": "int"}}, "bad": {{"type": "int", "constraints": ["unique", "unique"]}}}}"#
    )
    .unwrap();
    let table = load_table_spec(file.path()).unwrap();
    let err = build_columns(&table).unwrap_err();
    assert!(matches!(err, TranslateError::DuplicatedConstraint(_)));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(load_table_spec(file.path()).is_err());

    let dir = tempfile::tempdir().unwrap();
    let err = load_table_spec(dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn test_identifier_rules() {
    assert!(check_valid_name("abc_123", NameKind::Table).is_ok());
    for name in ["1abc", "   ", "", "123"] {
        assert!(check_valid_name(name, NameKind::Table).is_err(), "{:?}", name);
    }
    assert!(check_valid_name(&"x".repeat(65537), NameKind::Table).is_err());
}

const MAPPED_OPERATORS: [BinaryOperator; 13] = [
    BinaryOperator::Add,
    BinaryOperator::Sub,
    BinaryOperator::Mul,
    BinaryOperator::Div,
    BinaryOperator::Mod,
    BinaryOperator::Eq,
    BinaryOperator::Neq,
    BinaryOperator::Lt,
    BinaryOperator::Lte,
    BinaryOperator::Gt,
    BinaryOperator::Gte,
    BinaryOperator::And,
    BinaryOperator::Or,
];

const COLUMNS: [&str; 4] = ["a", "price", "Qty", "flag"];

fn random_leaf(rng: &mut StdRng) -> Expression {
    match rng.gen_range(0..5) {
        0 => Expression::column(COLUMNS[rng.gen_range(0..COLUMNS.len())]),
        1 => Expression::number(rng.gen_range(0..1000).to_string()),
        2 => Expression::number(format!("{}.5", rng.gen_range(0..100))),
        3 => Expression::string(if rng.gen_bool(0.5) { "it's" } else { "x" }),
        _ => Expression::Boolean(rng.gen_bool(0.5)),
    }
}

// Compound operands are parenthesized so the rendered text parses back
// to the same tree
fn grouped(expr: Expression) -> Expression {
    match expr {
        Expression::Binary { .. }
        | Expression::Not(_)
        | Expression::Neg(_)
        | Expression::In { .. } => Expression::paren(expr),
        other => other,
    }
}

fn random_expr(rng: &mut StdRng, depth: u32) -> Expression {
    if depth == 0 {
        return random_leaf(rng);
    }
    match rng.gen_range(0..7) {
        0 | 1 => {
            let op = MAPPED_OPERATORS[rng.gen_range(0..MAPPED_OPERATORS.len())];
            Expression::binary(
                op,
                grouped(random_expr(rng, depth - 1)),
                grouped(random_expr(rng, depth - 1)),
            )
        }
        2 => Expression::not(grouped(random_expr(rng, depth - 1))),
        3 => Expression::neg(grouped(random_expr(rng, depth - 1))),
        4 => {
            let len = rng.gen_range(1..4);
            Expression::in_list(
                Expression::column(COLUMNS[rng.gen_range(0..COLUMNS.len())]),
                (0..len).map(|_| random_leaf(rng)).collect(),
            )
        }
        5 => {
            let len = rng.gen_range(0..3);
            Expression::Anonymous {
                name: "my_fn".to_string(),
                args: (0..len).map(|_| Some(random_expr(rng, depth - 1))).collect(),
            }
        }
        _ => Expression::Function(
            FunctionCall::new(
                FunctionKind::Round,
                vec![
                    Some(random_expr(rng, depth - 1)),
                    Some(Expression::number("2")),
                ],
            )
            .unwrap(),
        ),
    }
}

#[test]
fn test_translation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let depth = rng.gen_range(0..5);
        let tree = random_expr(&mut rng, depth);

        let first = translate_condition(&tree, None).unwrap();
        let second = translate_condition(&tree, None).unwrap();
        assert_eq!(first, second);

        let text = tree.to_string();
        let reparsed = parse_condition(&text).unwrap();
        assert_eq!(reparsed, tree, "{}", text);
        assert_eq!(translate_condition(&reparsed, None).unwrap(), first);

        assert_eq!(parse_expr(&tree).unwrap(), first);
    }
}

#[test]
fn test_supported_shapes_have_matching_tags() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let tree = random_expr(&mut rng, 3);
        let expected = match &tree {
            Expression::Binary { .. }
            | Expression::Neg(_)
            | Expression::Anonymous { .. }
            | Expression::Function(_) => ParsedExprType::Function,
            Expression::Not(inner) if matches!(**inner, Expression::In { .. }) => {
                ParsedExprType::In
            }
            Expression::Not(_) => ParsedExprType::Function,
            Expression::In { .. } => ParsedExprType::In,
            Expression::Column(_) => ParsedExprType::Column,
            _ => ParsedExprType::Constant,
        };
        assert_eq!(
            translate_condition(&tree, None).unwrap().expr_type(),
            expected,
            "{}",
            tree
        );
    }
}

#[test]
fn test_concurrent_translation() {
    let text = "a > 1 AND b IN (1, 2, 3) OR NOT c = 'x'";
    let expected = translate(text);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(move || {
                (0..50)
                    .map(|_| translate(text))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}
