#![allow(missing_docs)]

use areagraph::{Area, AreaError, AreaGraph, AreaId, Relation, Result, GLOBAL_ROOT_ID};

/// site → {news, shop}; news → {article, banner}; shop → {banner, cart}.
fn build_site() -> Result<(AreaGraph, [AreaId; 6])> {
    let mut graph = AreaGraph::new();
    let site = graph.add_new_area(Area::default().with_alias("site")).expect("new area");
    let news = graph.add_new_area(Area::default().with_alias("news")).expect("new area");
    let shop = graph.add_new_area(Area::default().with_alias("shop")).expect("new area");
    let article = graph.add_new_area(Area::default().with_alias("article")).expect("new area");
    let banner = graph.add_new_area(Area::default().with_alias("banner")).expect("new area");
    let cart = graph.add_new_area(Area::default().with_alias("cart")).expect("new area");

    graph.add_subarea(GLOBAL_ROOT_ID, site, Relation::inheriting())?;
    graph.add_subarea(site, news, Relation::inheriting())?;
    graph.add_subarea(site, shop, Relation::inheriting())?;
    graph.add_subarea(news, article, Relation::inheriting())?;
    graph.add_subarea(news, banner, Relation::inheriting())?;
    graph.add_subarea(shop, banner, Relation::inheriting())?;
    graph.add_subarea(shop, cart, Relation::inheriting())?;
    graph.add_subarea(article, news, Relation::recursive())?;

    Ok((graph, [site, news, shop, article, banner, cart]))
}

#[test]
fn removing_one_branch_keeps_the_shared_banner() -> Result<()> {
    let (mut graph, [site, news, shop, article, banner, _]) = build_site()?;

    assert_eq!(graph.removable_subtree(&[news]), vec![news, article]);
    let removed = graph.remove_area_subtrees(&[news])?;
    assert_eq!(removed, 2);

    assert!(graph.area(news).is_none());
    assert!(graph.area(article).is_none());
    let banner_parents: Vec<_> = graph.area(banner).unwrap().super_area_ids().collect();
    assert_eq!(banner_parents, vec![shop]);
    let site_children: Vec<_> = graph.area(site).unwrap().sub_area_ids().collect();
    assert_eq!(site_children, vec![shop]);
    assert!(!graph.exists_circle_in_areas());
    Ok(())
}

#[test]
fn removing_both_branches_takes_the_banner_too() -> Result<()> {
    let (mut graph, [site, news, shop, article, banner, cart]) = build_site()?;

    let removed = graph.remove_area_subtrees(&[news, shop])?;
    assert_eq!(removed, 5);
    for id in [news, shop, article, banner, cart] {
        assert!(graph.area(id).is_none());
    }
    assert!(graph.area(site).unwrap().sub_edges().is_empty());
    Ok(())
}

#[test]
fn plain_removal_orphans_children_instead_of_deleting_them() -> Result<()> {
    let (mut graph, [site, news, _, article, _, _]) = build_site()?;

    graph.remove_area(news)?;
    let orphan = graph.area(article).unwrap();
    assert!(orphan.super_edges().is_empty());
    assert!(orphan.sub_edges().is_empty(), "recursion link back to news is gone");
    assert_eq!(graph.get_area_and_sub_areas(site, 0).len(), 4);
    Ok(())
}

#[test]
fn failed_removal_changes_nothing() -> Result<()> {
    let (mut graph, [site, ..]) = build_site()?;
    let before = graph.len();

    let err = graph.remove_area_subtrees(&[site, 999]).unwrap_err();
    assert_eq!(err, AreaError::UnknownArea(999));
    assert_eq!(graph.len(), before);
    Ok(())
}
