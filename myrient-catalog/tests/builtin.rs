use myrient_catalog::{Handling, SystemFlag, builtin, load_str, to_yaml_string};

#[test]
fn builtin_catalog_loads() {
    let catalog = builtin::catalog().unwrap();
    assert_eq!(catalog.len(), 19);
    for i in 0..19u32 {
        assert!(catalog.by_index(i).is_ok(), "index {i} missing");
    }
}

#[test]
fn builtin_is_loaded_once() {
    let a = builtin::catalog().unwrap();
    let b = builtin::catalog().unwrap();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn every_record_is_reachable_by_index_and_name() {
    let catalog = builtin::catalog().unwrap();
    for s in catalog.all() {
        assert_eq!(catalog.by_index(s.index).unwrap(), s);
        assert_eq!(catalog.by_name(&s.name).unwrap(), s);
    }
}

#[test]
fn only_ps3_isos_require_decryption() {
    let names: Vec<_> = builtin::catalog()
        .unwrap()
        .filter(|s| s.requires_decryption)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["PS3 ISOs"]);
}

#[test]
fn only_psn_pkgs_require_pkg_handling() {
    let names: Vec<_> = builtin::catalog()
        .unwrap()
        .with_flag(SystemFlag::RequiresPkgHandling)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["PSN PKGs"]);
}

#[test]
fn handling_strategies_cover_catalog() {
    let catalog = builtin::catalog().unwrap();
    let count = |h| catalog.by_handling(h).count();
    assert_eq!(count(Handling::Decrypt), 1);
    assert_eq!(count(Handling::PackageExtract), 1);
    assert_eq!(
        count(Handling::Decrypt)
            + count(Handling::PackageExtract)
            + count(Handling::MultiFile)
            + count(Handling::Plain),
        catalog.len()
    );
}

#[test]
fn all_twice_yields_same_sequence() {
    let catalog = builtin::catalog().unwrap();
    let first: Vec<_> = catalog.all().collect();
    let second: Vec<_> = catalog.all().collect();
    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);
}

#[test]
fn unknown_name_is_not_found() {
    let err = builtin::catalog()
        .unwrap()
        .by_name("Does Not Exist")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn manufacturers_include_known_vendors() {
    let manufacturers = builtin::catalog().unwrap().manufacturers();
    assert_eq!(manufacturers, vec!["Microsoft", "Nintendo", "Sega", "Sony"]);
}

#[test]
fn output_dir_keys_are_distinct_per_system() {
    let catalog = builtin::catalog().unwrap();
    assert_eq!(catalog.output_dir_keys().len(), catalog.len());
}

#[test]
fn builtin_round_trips() {
    let catalog = builtin::catalog().unwrap();
    let reloaded = load_str(&to_yaml_string(catalog).unwrap()).unwrap();
    assert_eq!(
        reloaded.all().collect::<Vec<_>>(),
        catalog.all().collect::<Vec<_>>()
    );
}

#[test]
fn list_cache_and_file_urls() {
    let ps3 = builtin::catalog().unwrap().by_name("PS3 ISOs").unwrap();
    assert_eq!(ps3.list_cache_file_name(), "ps3_isos_list.json");
    assert_eq!(
        ps3.file_url("Demon's Souls (USA).zip"),
        "https://myrient.erista.me/files/Redump/Sony%20-%20PlayStation%203/Demon%27s%20Souls%20%28USA%29.zip"
    );
}

#[test]
fn concurrent_readers_see_the_same_catalog() {
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    let catalog = builtin::catalog().unwrap();
                    catalog.by_index(i as u32).unwrap().name.clone()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let name = handle.join().unwrap();
            let expected = &builtin::catalog().unwrap().by_index(i as u32).unwrap().name;
            assert_eq!(&name, expected);
        }
    });
}
