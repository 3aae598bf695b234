//! Static sub-region table for broad regions.

/// Broad region → five representative sub-regions, chosen for popularity
/// and geographic spread. Long official names map to the same lists as
/// their short forms.
const WIDE_REGIONS: &[(&str, [&str; 5])] = &[
    // Busan
    ("부산", ["해운대", "광안리", "서면", "남포동", "태종대"]),
    ("부산광역시", ["해운대", "광안리", "서면", "남포동", "태종대"]),
    // Seoul
    ("서울", ["강남", "홍대", "명동", "이태원", "잠실"]),
    ("서울특별시", ["강남", "홍대", "명동", "이태원", "잠실"]),
    ("강남", ["신사동", "압구정", "청담동", "역삼", "삼성동"]),
    // Jeju
    ("제주", ["제주시", "서귀포", "성산", "애월", "중문"]),
    ("제주도", ["제주시", "서귀포", "성산", "애월", "중문"]),
    // Daegu
    ("대구", ["동성로", "수성못", "안지랑", "김광석길", "서문시장"]),
    ("대구광역시", ["동성로", "수성못", "안지랑", "김광석길", "서문시장"]),
    // Gwangju
    ("광주", ["양림동", "충장로", "송정", "첨단", "무등산"]),
    ("광주광역시", ["양림동", "충장로", "송정", "첨단", "무등산"]),
    // Incheon
    ("인천", ["차이나타운", "월미도", "송도", "강화", "을왕리"]),
    ("인천광역시", ["차이나타운", "월미도", "송도", "강화", "을왕리"]),
    // Daejeon
    ("대전", ["유성", "둔산", "대전역", "한밭수목원", "계룡산"]),
    ("대전광역시", ["유성", "둔산", "대전역", "한밭수목원", "계룡산"]),
    // Ulsan
    ("울산", ["태화강", "간절곶", "대왕암공원", "울산대공원", "장생포"]),
    ("울산광역시", ["태화강", "간절곶", "대왕암공원", "울산대공원", "장생포"]),
    // Gyeonggi
    ("경기", ["수원", "용인", "성남", "고양", "부천"]),
    ("경기도", ["수원", "용인", "성남", "고양", "부천"]),
    ("수원", ["수원역", "행궁동", "광교", "영통", "화성"]),
    // Gangwon
    ("강릉", ["경포대", "안목해변", "주문진", "정동진", "강릉역"]),
    ("속초", ["속초해수욕장", "청초호", "설악산", "속초항", "영랑호"]),
    ("춘천", ["남이섬", "소양강", "춘천역", "춘천명동", "의암호"]),
    // Jeolla
    ("전주", ["한옥마을", "전주역", "덕진공원", "남부시장", "동문거리"]),
    ("여수", ["여수엑스포", "오동도", "돌산", "여수항", "향일암"]),
    ("순천", ["순천만", "순천역", "낙안읍성", "순천만정원", "드라마세트장"]),
    // Gyeongsang
    ("경주", ["불국사", "첨성대", "대릉원", "동궁", "경주역"]),
    ("통영", ["동피랑", "케이블카", "통영항", "욕지도", "통영중앙시장"]),
    (
        "거제",
        ["외도", "바람의언덕", "학동흑진주몽돌해변", "거제도포로수용소", "구조라"],
    ),
    // Chungcheong
    (
        "천안",
        ["독립기념관", "천안역", "천안삼거리", "병천순대", "아라리오갤러리"],
    ),
    ("청주", ["청주역", "상당산성", "청주고인쇄박물관", "무심천", "수암골"]),
];

/// Neighbourhood-level names. A query containing any of these is already
/// specific enough for a single-center search.
pub(crate) const DETAILED_KEYWORDS: &[&str] = &[
    // Busan
    "해운대", "광안리", "서면", "남포동", "태종대", "송정", "기장", "영도", "감천", "자갈치",
    "범일동", "중앙동", "부산역", "부산대",
    // Seoul
    "홍대", "명동", "이태원", "잠실", "신촌", "압구정", "삼청동", "인사동", "북촌", "종로",
    "동대문", "신림", "건대", "노원", "강북", "마포", "여의도", "용산", "성수", "연남동",
    "망원동", "서촌",
    // Jeju
    "제주시", "서귀포", "성산", "애월", "중문", "협재", "한림", "표선", "우도", "마라도",
    "함덕", "김녕",
    // Gwangju
    "양림동", "충장로", "첨단", "무등산", "국립아시아문화전당",
    // Daegu
    "동성로", "수성못", "안지랑", "김광석길", "서문시장", "팔공산",
    // elsewhere
    "경포대", "안목", "주문진", "정동진", "남이섬", "소양강", "한옥마을", "오동도", "엑스포",
    "불국사", "첨성대", "동피랑",
];

/// Look up the sub-regions of a broad region (exact match after trimming)
pub fn sub_regions_of(name: &str) -> Option<&'static [&'static str]> {
    let name = name.trim();
    WIDE_REGIONS
        .iter()
        .find(|(region, _)| *region == name)
        .map(|(_, subs)| subs.as_slice())
}

/// All broad region names, in table order
pub fn wide_regions() -> impl Iterator<Item = &'static str> {
    WIDE_REGIONS.iter().map(|(region, _)| *region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region_has_five_sub_regions() {
        let subs = sub_regions_of("부산").unwrap();
        assert_eq!(subs.len(), 5);
        assert_eq!(subs[0], "해운대");
    }

    #[test]
    fn test_lookup_trims_input() {
        assert_eq!(sub_regions_of("  서울 "), sub_regions_of("서울"));
    }

    #[test]
    fn test_long_and_short_names_agree() {
        assert_eq!(sub_regions_of("부산광역시"), sub_regions_of("부산"));
        assert_eq!(sub_regions_of("제주도"), sub_regions_of("제주"));
    }

    #[test]
    fn test_unknown_region() {
        assert!(sub_regions_of("아틀란티스").is_none());
        assert!(sub_regions_of("").is_none());
    }

    #[test]
    fn test_wide_region_names_are_unique() {
        let names: Vec<_> = wide_regions().collect();
        let unique: hashbrown::HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }
}
