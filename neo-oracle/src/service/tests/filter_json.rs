use crate::filter::filter_json;

const STORE: &str = r#"
    {
        "Stores": ["Lambton Quay",  "Willis Street"],
        "Manufacturers": [{
            "Name": "Acme Co",
            "Products": [{ "Name": "Anvil", "Price": 50 }]
        },{
            "Name": "Contoso",
            "Products": [
                { "Name": "Elbow Grease", "Price": 99.95 },
                { "Name": "Headlight Fluid", "Price": 4 }
            ]
        }]
    }
    "#;

fn run(filter: &str) -> String {
    String::from_utf8(filter_json(STORE, Some(filter)).unwrap()).unwrap()
}

#[test]
fn filter_selects_store_fields() {
    assert_eq!(run("$.Manufacturers[0].Name"), r#"["Acme Co"]"#);
    assert_eq!(run("$.Manufacturers[0].Products[0].Price"), "[50]");
    assert_eq!(run("$.Manufacturers[1].Products[0].Name"), r#"["Elbow Grease"]"#);
    assert_eq!(
        run("$.Manufacturers[1].Products[0]"),
        r#"[{"Name":"Elbow Grease","Price":99.95}]"#
    );
}

#[test]
fn filter_collects_across_arrays() {
    assert_eq!(run("$.Stores[*]"), r#"["Lambton Quay","Willis Street"]"#);
    assert_eq!(
        run("$.Manufacturers[*].Name"),
        r#"["Acme Co","Contoso"]"#
    );
    assert_eq!(run("$..Price"), "[50,99.95,4]");
}
